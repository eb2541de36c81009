/// Add/edit form state machine and validation

use thiserror::Error;

use crate::status::Status;
use crate::storage::{KeyValueStorage, StoreError, WebhookStore};
use crate::webhook::{DeliveryMethod, WebhookId};

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("The webhook form is not open")]
    NotEditing,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which record a save will write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(WebhookId),
}

/// Hidden when `target` is `None`, otherwise editing that target
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    target: Option<EditTarget>,
    label: String,
    url: String,
    method: DeliveryMethod,
    default_method: DeliveryMethod,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(DeliveryMethod::default())
    }
}

impl FormController {
    pub fn new(default_method: DeliveryMethod) -> Self {
        FormController {
            target: None,
            label: String::new(),
            url: String::new(),
            method: default_method,
            default_method,
        }
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&EditTarget> {
        self.target.as_ref()
    }

    pub fn title(&self) -> &'static str {
        match self.target {
            Some(EditTarget::Existing(_)) => "Edit Webhook",
            _ => "Add Webhook",
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> DeliveryMethod {
        self.method
    }

    pub fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub fn set_method(&mut self, method: DeliveryMethod) {
        self.method = method;
    }

    /// Start editing; drafts are pre-filled from the record for `Existing`
    pub fn open<S>(&mut self, store: &WebhookStore<S>, target: EditTarget) -> Result<(), StoreError> {
        match &target {
            EditTarget::New => {
                self.label.clear();
                self.url.clear();
                self.method = self.default_method;
            }
            EditTarget::Existing(id) => {
                let webhook = store
                    .get(id)
                    .ok_or_else(|| StoreError::NotFound(id.clone()))?;
                self.label = webhook.label.clone();
                self.url = webhook.url.clone();
                self.method = webhook.method;
            }
        }

        self.target = Some(target);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.target = None;
        self.label.clear();
        self.url.clear();
        self.method = self.default_method;
    }

    /// Close the form if it was editing a record that has since been deleted
    pub fn forget(&mut self, id: &WebhookId) {
        if self.target == Some(EditTarget::Existing(id.clone())) {
            self.cancel();
        }
    }

    /// Validate the drafts, commit them into `store` and persist it
    ///
    /// Validation failures leave both the store and the form untouched.
    pub fn submit<S: KeyValueStorage>(&mut self, store: &mut WebhookStore<S>) -> Result<Status, FormError> {
        let target = self.target.clone().ok_or(FormError::NotEditing)?;
        let (label, url) = validate(&self.label, &self.url)?;

        let message = match target {
            EditTarget::New => {
                store.add(label, url, self.method);
                "Webhook added!"
            }
            EditTarget::Existing(id) => {
                store.update(&id, label, url, self.method)?;
                "Webhook updated!"
            }
        };

        store.save()?;
        self.cancel();
        Ok(Status::success(message))
    }
}

/// Remove the webhook `id` once the user has `confirmed`, persist, and close
/// the form if it was editing that record
///
/// Declining returns `Ok(None)` without touching anything. On error the
/// caller should discard `store`, which may already be missing the record.
pub fn delete_webhook<S: KeyValueStorage>(
    store: &mut WebhookStore<S>,
    form: &mut FormController,
    id: &WebhookId,
    confirmed: bool,
) -> Result<Option<Status>, StoreError> {
    if !confirmed {
        return Ok(None);
    }

    let removed = store.remove(id)?;
    store.save()?;
    log::info!("Deleted webhook \"{}\"", removed.label);

    form.forget(id);
    Ok(Some(Status::success("Webhook deleted")))
}

/// Trim both fields and check the URL parses as an absolute URL
pub fn validate(label: &str, url: &str) -> Result<(String, String), FormError> {
    let label = label.trim();
    let url = url.trim();

    if label.is_empty() || url.is_empty() {
        return Err(FormError::MissingFields);
    }

    if url::Url::parse(url).is_err() {
        return Err(FormError::InvalidUrl);
    }

    Ok((label.to_string(), url.to_string()))
}
