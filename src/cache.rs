/// Offline asset cache policy

/// Static assets pre-cached on install, relative to the base path
pub const ASSETS: [&str; 7] = [
    "",
    "index.html",
    "pkg/webhook_sender.js",
    "pkg/webhook_sender_bg.wasm",
    "manifest.json",
    "icon192.png",
    "icon512.png",
];

pub fn precache_urls(base_path: &str) -> Vec<String> {
    let base = if base_path.ends_with('/') {
        base_path.to_string()
    } else {
        format!("{}/", base_path)
    };

    ASSETS.iter().map(|asset| format!("{}{}", base, asset)).collect()
}

/// Cache buckets left behind by earlier versions
pub fn stale_caches<'a>(names: &'a [String], current: &str) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| *name != current)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precache_urls() {
        let urls = precache_urls("/webhook-sender/");

        assert_eq!(urls.len(), ASSETS.len());
        assert_eq!(urls[0], "/webhook-sender/");
        assert_eq!(urls[1], "/webhook-sender/index.html");
        assert!(urls.contains(&"/webhook-sender/manifest.json".to_string()));
        assert!(urls.contains(&"/webhook-sender/icon512.png".to_string()));
    }

    #[test]
    fn test_precache_urls_without_trailing_slash() {
        assert_eq!(precache_urls("/app")[1], "/app/index.html");
    }

    #[test]
    fn test_stale_caches_after_version_change() {
        let names = vec![
            "webhook-sender-v1".to_string(),
            "webhook-sender-v2".to_string(),
            "someone-else".to_string(),
        ];

        let stale = stale_caches(&names, "webhook-sender-v2");

        assert_eq!(stale, vec!["webhook-sender-v1", "someone-else"]);
    }

    #[test]
    fn test_no_stale_caches() {
        let names = vec!["webhook-sender-v1".to_string()];
        assert!(stale_caches(&names, "webhook-sender-v1").is_empty());
        assert!(stale_caches(&[], "webhook-sender-v1").is_empty());
    }
}
