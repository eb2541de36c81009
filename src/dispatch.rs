/// Sending a shared link to a webhook: request shapes, in-flight guard, outcomes

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::http::{HttpMethod, HttpResponse, OutboundRequest, TransportError};
use crate::share::SharedContent;
use crate::status::Status;
use crate::storage::WebhookStore;
use crate::webhook::{DeliveryMethod, Webhook, WebhookId};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("That webhook no longer exists ({0})")]
    UnknownWebhook(WebhookId),
    #[error("Already sending to \"{0}\"")]
    Busy(String),
    #[error("Invalid URL for \"{label}\": {reason}")]
    InvalidTarget { label: String, reason: String },
    #[error("Failed to encode payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct SharePayload<'a> {
    url: &'a str,
    title: &'a str,
    timestamp: &'a str,
}

/// Build the outbound request for `webhook` according to its delivery method
pub fn build_request(
    webhook: &Webhook,
    shared: &SharedContent,
    timestamp: &str,
) -> Result<OutboundRequest, DispatchError> {
    match webhook.method {
        DeliveryMethod::QueryGet => {
            let mut url = url::Url::parse(&webhook.url).map_err(|e| DispatchError::InvalidTarget {
                label: webhook.label.clone(),
                reason: e.to_string(),
            })?;
            url.query_pairs_mut().append_pair("job_link", &shared.url);

            Ok(OutboundRequest {
                method: HttpMethod::Get,
                url: url.to_string(),
                headers: Vec::new(),
                body: None,
            })
        }
        DeliveryMethod::JsonPost => {
            let body = serde_json::to_string(&SharePayload {
                url: &shared.url,
                title: &shared.title,
                timestamp,
            })?;

            Ok(OutboundRequest {
                method: HttpMethod::Post,
                url: webhook.url.clone(),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: Some(body),
            })
        }
    }
}

/// Current time as an ISO-8601 string, as `Date.prototype.toISOString` prints it
pub fn timestamp_now() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

/// A dispatch that has been accepted and marked in flight
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDispatch {
    pub id: WebhookId,
    pub label: String,
    pub request: OutboundRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { label: String },
    Rejected { label: String, status: u16 },
    Failed { label: String, reason: String },
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered { .. })
    }

    /// How long to wait before leaving the share view, if at all
    pub fn redirect_after(&self, delay_ms: u32) -> Option<u32> {
        self.is_delivered().then_some(delay_ms)
    }

    pub fn status(&self) -> Status {
        match self {
            DispatchOutcome::Delivered { label } => Status::success(format!("✅ Sent to \"{}\"", label)),
            DispatchOutcome::Rejected { label, .. } => {
                Status::error(format!("❌ Failed to send to \"{}\"", label))
            }
            DispatchOutcome::Failed { reason, .. } => Status::error(format!("❌ Error: {}", reason)),
        }
    }
}

/// Tracks which webhooks have a request in flight
#[derive(Debug, Default)]
pub struct Dispatcher {
    in_flight: HashSet<WebhookId>,
}

impl Dispatcher {
    pub fn is_pending(&self, id: &WebhookId) -> bool {
        self.in_flight.contains(id)
    }

    pub fn pending(&self) -> Vec<WebhookId> {
        self.in_flight.iter().cloned().collect()
    }

    /// Resolve `id` against the store as it is now and mark it in flight
    pub fn begin<S>(
        &mut self,
        store: &WebhookStore<S>,
        id: &WebhookId,
        shared: &SharedContent,
        timestamp: &str,
    ) -> Result<PreparedDispatch, DispatchError> {
        let webhook = store
            .get(id)
            .ok_or_else(|| DispatchError::UnknownWebhook(id.clone()))?;

        if self.is_pending(id) {
            return Err(DispatchError::Busy(webhook.label.clone()));
        }

        let request = build_request(webhook, shared, timestamp)?;
        self.in_flight.insert(id.clone());

        Ok(PreparedDispatch {
            id: id.clone(),
            label: webhook.label.clone(),
            request,
        })
    }

    /// Clear the in-flight marker and classify the response
    pub fn complete(
        &mut self,
        dispatch: &PreparedDispatch,
        result: Result<HttpResponse, TransportError>,
    ) -> DispatchOutcome {
        self.in_flight.remove(&dispatch.id);
        let label = dispatch.label.clone();

        match result {
            Ok(response) if response.is_success() => DispatchOutcome::Delivered { label },
            Ok(response) => {
                log::error!(
                    "Webhook failed: {} {}",
                    response.status,
                    response.body.as_deref().unwrap_or("Unknown error")
                );
                DispatchOutcome::Rejected {
                    label,
                    status: response.status,
                }
            }
            Err(e) => {
                log::error!("Fetch error: {}", e);
                DispatchOutcome::Failed {
                    label,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const TIMESTAMP: &str = "2024-10-28T10:30:00.000Z";

    fn shared() -> SharedContent {
        SharedContent {
            url: "https://jobs.example/a b?c=d".to_string(),
            title: "Rust dev".to_string(),
        }
    }

    fn store_with(method: DeliveryMethod) -> (WebhookStore<MemoryStorage>, WebhookId) {
        let mut store = WebhookStore::new(MemoryStorage::new(), "webhooks");
        let id = store.add("Make".to_string(), "https://hook.example/x".to_string(), method);
        (store, id)
    }

    #[test]
    fn test_query_get_request() {
        let webhook = Webhook::new(
            "Make".to_string(),
            "https://hook.example/x".to_string(),
            DeliveryMethod::QueryGet,
        );

        let request = build_request(&webhook, &shared(), TIMESTAMP).unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://hook.example/x?job_link=https%3A%2F%2Fjobs.example%2Fa+b%3Fc%3Dd"
        );
        assert!(request.headers.is_empty());
        assert_eq!(request.body, None);
    }

    #[test]
    fn test_query_get_keeps_existing_params() {
        let webhook = Webhook::new(
            "Make".to_string(),
            "https://hook.example/x?token=abc".to_string(),
            DeliveryMethod::QueryGet,
        );

        let request = build_request(&webhook, &shared(), TIMESTAMP).unwrap();

        assert!(request.url.starts_with("https://hook.example/x?token=abc&job_link="));
    }

    #[test]
    fn test_json_post_request() {
        let webhook = Webhook::new(
            "Generic".to_string(),
            "https://hook.example/json".to_string(),
            DeliveryMethod::JsonPost,
        );

        let request = build_request(&webhook, &shared(), TIMESTAMP).unwrap();
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://hook.example/json");
        assert_eq!(
            request.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        assert_eq!(body["url"], "https://jobs.example/a b?c=d");
        assert_eq!(body["title"], "Rust dev");
        assert_eq!(body["timestamp"], TIMESTAMP);
    }

    #[test]
    fn test_rejected_response_reports_label_and_keeps_store() {
        let (store, id) = store_with(DeliveryMethod::QueryGet);
        let before = store.webhooks().to_vec();
        let mut dispatcher = Dispatcher::default();

        let prepared = dispatcher.begin(&store, &id, &shared(), TIMESTAMP).unwrap();
        let outcome = dispatcher.complete(
            &prepared,
            Ok(HttpResponse {
                status: 500,
                body: Some("boom".to_string()),
            }),
        );

        assert_eq!(
            outcome,
            DispatchOutcome::Rejected {
                label: "Make".to_string(),
                status: 500
            }
        );
        assert!(outcome.status().is_error());
        assert!(outcome.status().message.contains("Make"));
        assert_eq!(store.webhooks(), before.as_slice());
        assert!(!dispatcher.is_pending(&id));
    }

    #[test]
    fn test_delivered_response() {
        let (store, id) = store_with(DeliveryMethod::JsonPost);
        let mut dispatcher = Dispatcher::default();

        let prepared = dispatcher.begin(&store, &id, &shared(), TIMESTAMP).unwrap();
        let outcome = dispatcher.complete(&prepared, Ok(HttpResponse { status: 200, body: None }));

        assert!(outcome.is_delivered());
        assert_eq!(outcome.status(), Status::success("✅ Sent to \"Make\""));
        assert_eq!(outcome.redirect_after(2000), Some(2000));
    }

    #[test]
    fn test_only_delivery_leaves_share_view() {
        let rejected = DispatchOutcome::Rejected {
            label: "Make".to_string(),
            status: 404,
        };
        let failed = DispatchOutcome::Failed {
            label: "Make".to_string(),
            reason: "Failed to fetch".to_string(),
        };

        assert_eq!(rejected.redirect_after(2000), None);
        assert_eq!(failed.redirect_after(2000), None);
    }

    #[test]
    fn test_transport_failure_reports_description() {
        let (store, id) = store_with(DeliveryMethod::QueryGet);
        let mut dispatcher = Dispatcher::default();

        let prepared = dispatcher.begin(&store, &id, &shared(), TIMESTAMP).unwrap();
        let outcome = dispatcher.complete(&prepared, Err(TransportError::new("Failed to fetch")));

        assert_eq!(outcome.status(), Status::error("❌ Error: Failed to fetch"));
        assert!(!dispatcher.is_pending(&id));
    }

    #[test]
    fn test_second_dispatch_while_pending_is_rejected() {
        let (mut store, id) = store_with(DeliveryMethod::QueryGet);
        let other = store.add("Other".to_string(), "https://other.example/".to_string(), DeliveryMethod::QueryGet);
        let mut dispatcher = Dispatcher::default();

        let prepared = dispatcher.begin(&store, &id, &shared(), TIMESTAMP).unwrap();

        assert!(matches!(
            dispatcher.begin(&store, &id, &shared(), TIMESTAMP),
            Err(DispatchError::Busy(label)) if label == "Make"
        ));
        assert!(dispatcher.begin(&store, &other, &shared(), TIMESTAMP).is_ok());
        assert_eq!(dispatcher.pending().len(), 2);

        dispatcher.complete(&prepared, Ok(HttpResponse { status: 204, body: None }));
        assert!(dispatcher.begin(&store, &id, &shared(), TIMESTAMP).is_ok());
    }

    #[test]
    fn test_dispatch_to_deleted_webhook() {
        let (mut store, id) = store_with(DeliveryMethod::QueryGet);
        store.remove(&id).unwrap();
        let mut dispatcher = Dispatcher::default();

        let result = dispatcher.begin(&store, &id, &shared(), TIMESTAMP);

        assert!(matches!(result, Err(DispatchError::UnknownWebhook(_))));
        assert!(dispatcher.pending().is_empty());
    }

    #[test]
    fn test_invalid_target_url() {
        let mut store = WebhookStore::new(MemoryStorage::new(), "webhooks");
        let id = store.add("Broken".to_string(), "nope".to_string(), DeliveryMethod::QueryGet);
        let mut dispatcher = Dispatcher::default();

        let result = dispatcher.begin(&store, &id, &shared(), TIMESTAMP);

        assert!(matches!(result, Err(DispatchError::InvalidTarget { .. })));
        assert!(!dispatcher.is_pending(&id));
    }
}
