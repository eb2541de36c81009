/// Webhook Sender - forward shared links to your own webhooks
/// Built with Rust + WASM + Yew

pub mod cache;
pub mod config;
pub mod dispatch;
pub mod form;
pub mod http;
pub mod share;
pub mod status;
pub mod storage;
pub mod ui;
pub mod webhook;
mod worker;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::config::AppConfig;

// Runs in both the page and the service worker
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_global();
    wasm_logger::init(wasm_logger::Config::new(config.log_level()));
}

// Start the Yew app for the main page
#[wasm_bindgen]
pub fn start_app() {
    let config = AppConfig::from_global();
    register_service_worker(&config);
    yew::Renderer::<ui::app::App>::new().render();
}

fn register_service_worker(config: &AppConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();

    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        log::info!("Service workers unsupported, offline cache disabled");
        return;
    }

    let script = format!("{}sw.js", config.base_path);
    let registration = navigator.service_worker().register(&script);

    spawn_local(async move {
        match JsFuture::from(registration).await {
            Ok(_) => log::info!("Service worker registered from {}", script),
            Err(e) => log::warn!("Service worker registration failed: {:?}", e),
        }
    });
}
