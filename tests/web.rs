//! Browser tests; run with `wasm-pack test --headless --chrome`
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use webhook_sender::config::{AppConfig, CONFIG_GLOBAL};
use webhook_sender::share::{clear_share_params, SharedContent};
use webhook_sender::status::{Status, StatusSlot};
use webhook_sender::storage::{KeyValueStorage, LocalStorage, WebhookStore};
use webhook_sender::webhook::DeliveryMethod;

wasm_bindgen_test_configure!(run_in_browser);

const KEY: &str = "webhook-sender-test";

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let mut store = WebhookStore::new(LocalStorage, KEY);
    store.add("A".to_string(), "https://a.example/hook".to_string(), DeliveryMethod::QueryGet);
    store.add("B".to_string(), "https://b.example/hook".to_string(), DeliveryMethod::JsonPost);
    store.save().unwrap();

    let reloaded = WebhookStore::load(LocalStorage, KEY);

    assert_eq!(reloaded.webhooks(), store.webhooks());
}

#[wasm_bindgen_test]
fn corrupt_local_storage_loads_empty() {
    LocalStorage.set_item(KEY, "[{oops").unwrap();

    let store = WebhookStore::load(LocalStorage, KEY);

    assert!(store.is_empty());
}

#[wasm_bindgen_test]
fn config_from_window_global() {
    let global = js_sys::global();
    let overrides = js_sys::JSON::parse(r#"{"storageKey":"other","statusTimeoutMs":1500}"#).unwrap();
    js_sys::Reflect::set(&global, &JsValue::from_str(CONFIG_GLOBAL), &overrides).unwrap();

    let config = AppConfig::from_global();

    assert_eq!(config.storage_key, "other");
    assert_eq!(config.status_timeout_ms, 1500);
    assert_eq!(config.redirect_delay_ms, 2000);

    js_sys::Reflect::delete_property(&global, &JsValue::from_str(CONFIG_GLOBAL)).unwrap();
    assert_eq!(AppConfig::from_global(), AppConfig::default());
}

#[wasm_bindgen_test]
fn share_helpers_in_browser() {
    let shared = SharedContent::from_query("?url=https%3A%2F%2Fjobs.example%2F1&title=T").unwrap();

    assert_eq!(shared.url, "https://jobs.example/1");
    assert_eq!(
        clear_share_params("https://me.example/app/?url=x").as_deref(),
        Some("https://me.example/app/")
    );
}

fn schedule_clear(slot: &Rc<RefCell<StatusSlot>>, status: Status, display_ms: u32) -> Timeout {
    let ticket = slot.borrow_mut().show(status);
    let slot = slot.clone();
    Timeout::new(display_ms, move || {
        slot.borrow_mut().expire(ticket);
    })
}

#[wasm_bindgen_test]
async fn status_clears_after_timeout() {
    let slot = Rc::new(RefCell::new(StatusSlot::default()));
    let _timer = schedule_clear(&slot, Status::success("Webhook added!"), 50);

    assert!(slot.borrow().current().is_some());
    TimeoutFuture::new(120).await;
    assert_eq!(slot.borrow().current(), None);
}

#[wasm_bindgen_test]
async fn newer_status_restarts_timer() {
    let slot = Rc::new(RefCell::new(StatusSlot::default()));
    let mut timer = Some(schedule_clear(&slot, Status::info("first"), 100));

    TimeoutFuture::new(60).await;
    timer.replace(schedule_clear(&slot, Status::success("second"), 100));

    // Past the first deadline, inside the second
    TimeoutFuture::new(60).await;
    assert_eq!(slot.borrow().current(), Some(&Status::success("second")));

    TimeoutFuture::new(100).await;
    assert_eq!(slot.borrow().current(), None);
    drop(timer);
}
