/// Panel shown when the app is opened through the share target

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::share::SharedContent;
use crate::ui::components::EmptyMessage;
use crate::webhook::{Webhook, WebhookId};

#[derive(Properties, PartialEq)]
pub struct SharePanelProps {
    pub shared: SharedContent,
    pub webhooks: Vec<Webhook>,
    /// Webhooks with a request in flight
    #[prop_or_default]
    pub pending: Vec<WebhookId>,
    pub on_send: Callback<WebhookId>,
}

#[function_component(SharePanel)]
pub fn share_panel(props: &SharePanelProps) -> Html {
    html! {
        <div class="share-card">
            <h2 class="share-title">{"Share to webhook"}</h2>
            <div class="shared-url">
                <strong>{"URL: "}</strong>{&props.shared.url}
            </div>
            if !props.shared.title.is_empty() {
                <div class="shared-title">
                    <strong>{"Title: "}</strong>{&props.shared.title}
                </div>
            }

            if props.webhooks.is_empty() {
                <EmptyMessage>
                    <p>{"No webhooks configured yet."}<br />{"Please add a webhook first."}</p>
                </EmptyMessage>
            } else {
                <div class="share-webhook-list">
                    {for props.webhooks.iter().map(|webhook| {
                        let id = webhook.id.clone();
                        let busy = props.pending.contains(&webhook.id);

                        html! {
                            <div key={webhook.id.to_string()} class="share-webhook-item">
                                <Button
                                    onclick={props.on_send.reform(move |_| id.clone())}
                                    disabled={busy}
                                    block={true}
                                >
                                    {format!("Send to {}", webhook.label)}
                                </Button>
                            </div>
                        }
                    })}
                </div>
            }
        </div>
    }
}
