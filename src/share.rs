/// Shared link extraction from the share-target query string

use std::sync::LazyLock;

use regex::Regex;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid link pattern"));

/// A link handed to the app by the OS share sheet or query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedContent {
    pub url: String,
    pub title: String,
}

impl SharedContent {
    /// Parse `url` (preferred), `text` (fallback) and `title` from a query string
    ///
    /// Returns `None` when neither `url` nor `text` carries anything.
    pub fn from_query(query: &str) -> Option<SharedContent> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut url = None;
        let mut text = None;
        let mut title = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "url" => &mut url,
                "text" => &mut text,
                "title" => &mut title,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .or_else(|| {
                text.as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(extract_link)
            })?;

        Some(SharedContent {
            url,
            title: title.unwrap_or_default(),
        })
    }
}

/// Pull the first http(s) link out of shared prose, or keep the text as-is
fn extract_link(text: &str) -> String {
    LINK_PATTERN
        .find(text)
        .map(|m| trim_link(m.as_str()))
        .unwrap_or(text)
        .to_string()
}

/// Drop sentence punctuation and unbalanced closing brackets from the end of a link
fn trim_link(link: &str) -> &str {
    let mut link = link;

    loop {
        let trimmed = link.trim_end_matches(['.', ',', ';', ':', '!', '?']);
        let trimmed = match trimmed.chars().last() {
            Some(')') if trimmed.matches('(').count() < trimmed.matches(')').count() => {
                &trimmed[..trimmed.len() - 1]
            }
            Some(']') if trimmed.matches('[').count() < trimmed.matches(']').count() => {
                &trimmed[..trimmed.len() - 1]
            }
            _ => trimmed,
        };

        if trimmed == link {
            return link;
        }
        link = trimmed;
    }
}

/// Read the shared link from the current page location
pub fn from_location() -> Option<SharedContent> {
    let search = web_sys::window()?.location().search().ok()?;
    SharedContent::from_query(&search)
}

/// The page URL with the share parameters removed
pub fn clear_share_params(href: &str) -> Option<String> {
    let mut url = url::Url::parse(href).ok()?;
    url.set_query(None);
    Some(url.to_string())
}

/// Navigate back to the app's base view, dropping the shared link
pub fn return_to_base() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();

    let target = location
        .href()
        .ok()
        .and_then(|href| clear_share_params(&href));

    if let Some(target) = target {
        if let Err(e) = location.set_href(&target) {
            log::warn!("Failed to navigate to {}: {:?}", target, e);
        }
    }
}
