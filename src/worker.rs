/// Service worker event handlers, called from static/sw.js

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Cache, Request, Response, ServiceWorkerGlobalScope};

use crate::cache::{precache_urls, stale_caches};
use crate::config::AppConfig;

fn worker_scope() -> Result<ServiceWorkerGlobalScope, JsValue> {
    Ok(js_sys::global().dyn_into::<ServiceWorkerGlobalScope>()?)
}

/// Populate the current cache bucket; any failed asset rejects the install
#[wasm_bindgen]
pub async fn sw_install() -> Result<(), JsValue> {
    let config = AppConfig::from_global();
    let caches = worker_scope()?.caches()?;

    let cache: Cache = JsFuture::from(caches.open(&config.cache_name))
        .await?
        .dyn_into()?;

    let urls: js_sys::Array = precache_urls(&config.base_path)
        .into_iter()
        .map(JsValue::from)
        .collect();
    JsFuture::from(cache.add_all_with_str_sequence(&urls)).await?;

    log::info!("Cached {} assets in {}", urls.length(), config.cache_name);
    Ok(())
}

/// Delete every cache bucket that is not the current version
#[wasm_bindgen]
pub async fn sw_activate() -> Result<(), JsValue> {
    let config = AppConfig::from_global();
    let caches = worker_scope()?.caches()?;

    let keys: js_sys::Array = JsFuture::from(caches.keys()).await?.dyn_into()?;
    let names: Vec<String> = keys.iter().filter_map(|key| key.as_string()).collect();

    let deletions: js_sys::Array = stale_caches(&names, &config.cache_name)
        .into_iter()
        .map(|name| {
            log::info!("Deleting old cache {}", name);
            JsValue::from(caches.delete(name))
        })
        .collect();
    JsFuture::from(js_sys::Promise::all(&deletions)).await?;

    Ok(())
}

/// Cache first, network otherwise; fetched responses are not added to the cache
#[wasm_bindgen]
pub async fn sw_fetch(request: Request) -> Result<Response, JsValue> {
    let scope = worker_scope()?;

    let cached = JsFuture::from(scope.caches()?.match_with_request(&request)).await?;
    if !cached.is_undefined() {
        return cached.dyn_into();
    }

    JsFuture::from(scope.fetch_with_request(&request))
        .await?
        .dyn_into()
}
