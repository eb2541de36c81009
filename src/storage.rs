/// Webhook persistence over window.localStorage

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

use crate::webhook::{DeliveryMethod, Webhook, WebhookId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no webhook at position {0}")]
    OutOfRange(usize),
    #[error("webhook {0} no longer exists")]
    NotFound(WebhookId),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write webhooks: {0}")]
    Write(String),
    #[error("failed to serialize webhooks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value backend the store persists into
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The browser's `window.localStorage`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;

        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{:?}", e)))
    }
}

/// In-memory backend; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Just enough of a stored record to tell whether it already has an id
#[derive(Deserialize)]
struct StoredId {
    id: Option<IgnoredAny>,
}

/// Ordered list of webhooks plus the backend it is persisted to
///
/// The whole list is written as one JSON array on every `save`.
#[derive(Debug, Clone)]
pub struct WebhookStore<S = LocalStorage> {
    backend: S,
    key: String,
    webhooks: Vec<Webhook>,
}

impl<S> WebhookStore<S> {
    pub fn new(backend: S, key: &str) -> Self {
        WebhookStore {
            backend,
            key: key.to_string(),
            webhooks: Vec::new(),
        }
    }

    pub fn webhooks(&self) -> &[Webhook] {
        &self.webhooks
    }

    pub fn len(&self) -> usize {
        self.webhooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.webhooks.is_empty()
    }

    pub fn get(&self, id: &WebhookId) -> Option<&Webhook> {
        self.webhooks.iter().find(|w| &w.id == id)
    }

    pub fn position(&self, id: &WebhookId) -> Option<usize> {
        self.webhooks.iter().position(|w| &w.id == id)
    }

    pub fn add(&mut self, label: String, url: String, method: DeliveryMethod) -> WebhookId {
        let webhook = Webhook::new(label, url, method);
        let id = webhook.id.clone();
        self.webhooks.push(webhook);
        id
    }

    pub fn update(
        &mut self,
        id: &WebhookId,
        label: String,
        url: String,
        method: DeliveryMethod,
    ) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.update_at(index, label, url, method)
    }

    /// Replace the record at `index` in place, keeping its id
    pub fn update_at(
        &mut self,
        index: usize,
        label: String,
        url: String,
        method: DeliveryMethod,
    ) -> Result<(), StoreError> {
        let webhook = self
            .webhooks
            .get_mut(index)
            .ok_or(StoreError::OutOfRange(index))?;

        webhook.label = label;
        webhook.url = url;
        webhook.method = method;
        Ok(())
    }

    pub fn remove(&mut self, id: &WebhookId) -> Result<Webhook, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.remove_at(index)
    }

    /// Remove the record at `index`; later records shift down by one
    pub fn remove_at(&mut self, index: usize) -> Result<Webhook, StoreError> {
        if index >= self.webhooks.len() {
            return Err(StoreError::OutOfRange(index));
        }
        Ok(self.webhooks.remove(index))
    }
}

impl<S: KeyValueStorage> WebhookStore<S> {
    /// Load the persisted list; a missing, unreadable or corrupt blob yields an empty store
    ///
    /// Records saved without an id get one here, and the list is written back
    /// so those ids stay the same on the next load.
    pub fn load(backend: S, key: &str) -> Self {
        let mut store = Self::new(backend, key);

        let blob = match store.backend.get_item(key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return store,
            Err(e) => {
                log::warn!("Could not read webhooks: {}", e);
                return store;
            }
        };

        match serde_json::from_str::<Vec<Webhook>>(&blob) {
            Ok(webhooks) => store.webhooks = webhooks,
            Err(e) => {
                log::warn!("Ignoring corrupt webhook list in '{}': {}", key, e);
                return store;
            }
        }

        if missing_ids(&blob) {
            match store.save() {
                Ok(()) => log::info!("Assigned ids to legacy webhooks in '{}'", key),
                Err(e) => log::warn!("Could not persist ids for legacy webhooks: {}", e),
            }
        }

        store
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let blob = serde_json::to_string(&self.webhooks)?;
        self.backend.set_item(&self.key, &blob)
    }
}

fn missing_ids(blob: &str) -> bool {
    serde_json::from_str::<Vec<StoredId>>(blob)
        .map(|records| records.iter().any(|r| r.id.is_none()))
        .unwrap_or(false)
}
