/// Data structures for Webhook Sender
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a webhook, generated once at creation time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookId(String);

impl WebhookId {
    pub fn generate() -> WebhookId {
        WebhookId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a shared link is delivered to a webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// GET with the link in a `job_link` query parameter (Make.com style)
    #[default]
    QueryGet,
    /// POST with a `{url, title, timestamp}` JSON body
    JsonPost,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 2] = [DeliveryMethod::QueryGet, DeliveryMethod::JsonPost];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::QueryGet => "query_get",
            DeliveryMethod::JsonPost => "json_post",
        }
    }

    /// Short human label for lists and the form selector
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryMethod::QueryGet => "GET ?job_link=",
            DeliveryMethod::JsonPost => "POST JSON",
        }
    }
}

impl FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query_get" => Ok(DeliveryMethod::QueryGet),
            "json_post" => Ok(DeliveryMethod::JsonPost),
            other => Err(format!("unknown delivery method: {}", other)),
        }
    }
}

/// A configured outbound endpoint
///
/// Records written before ids and delivery methods existed only carry
/// `label` and `url`; both missing fields are filled in on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(default = "WebhookId::generate")]
    pub id: WebhookId,
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub method: DeliveryMethod,
}

impl Webhook {
    pub fn new(label: String, url: String, method: DeliveryMethod) -> Webhook {
        Webhook {
            id: WebhookId::generate(),
            label,
            url,
            method,
        }
    }
}
