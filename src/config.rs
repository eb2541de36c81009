/// Runtime configuration
///
/// Every field has a default; a page or service worker can override any of
/// them by defining a global `WEBHOOK_SENDER_CONFIG` object before the wasm
/// module starts.
use std::str::FromStr;

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::webhook::DeliveryMethod;

pub const CONFIG_GLOBAL: &str = "WEBHOOK_SENDER_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// localStorage key holding the webhook list
    pub storage_key: String,
    /// Path the app is served from; always ends with '/'
    pub base_path: String,
    /// Name of the current asset cache bucket
    pub cache_name: String,
    pub status_timeout_ms: u32,
    /// Delay between a successful send and returning to the base view
    pub redirect_delay_ms: u32,
    pub default_method: DeliveryMethod,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            storage_key: "webhooks".to_string(),
            base_path: "/webhook-sender/".to_string(),
            cache_name: "webhook-sender-v1".to_string(),
            status_timeout_ms: 4000,
            redirect_delay_ms: 2000,
            default_method: DeliveryMethod::QueryGet,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read overrides from the global scope (window or service worker)
    pub fn from_global() -> Self {
        let global = js_sys::global();
        let value = match js_sys::Reflect::get(&global, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };

        match serde_wasm_bindgen::from_value::<AppConfig>(value) {
            Ok(config) => config.normalized(),
            Err(e) => {
                log::warn!("Ignoring invalid {}: {:?}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        if !self.base_path.ends_with('/') {
            self.base_path.push('/');
        }
        self
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(&self.log_level).unwrap_or(log::Level::Info)
    }
}
