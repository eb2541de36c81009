/// Configured webhooks with edit and delete actions

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::ui::components::EmptyMessage;
use crate::webhook::{Webhook, WebhookId};

#[derive(Properties, PartialEq)]
pub struct WebhookListProps {
    pub webhooks: Vec<Webhook>,
    pub on_edit: Callback<WebhookId>,
    pub on_delete: Callback<WebhookId>,
}

#[function_component(WebhookList)]
pub fn webhook_list(props: &WebhookListProps) -> Html {
    if props.webhooks.is_empty() {
        return html! {
            <EmptyMessage icon={"📭".to_string()}>
                <p>{"No webhooks configured yet."}<br />{"Add one below to get started!"}</p>
            </EmptyMessage>
        };
    }

    html! {
        <div class="webhook-list">
            {for props.webhooks.iter().map(|webhook| {
                let edit_id = webhook.id.clone();
                let delete_id = webhook.id.clone();

                html! {
                    <div key={webhook.id.to_string()} class="webhook-item">
                        <div class="webhook-details">
                            <div class="webhook-label">{&webhook.label}</div>
                            <div class="webhook-url">{&webhook.url}</div>
                            <div class="webhook-method">{webhook.method.label()}</div>
                        </div>
                        <Button
                            onclick={props.on_edit.reform(move |_| edit_id.clone())}
                            variant={ButtonVariant::Secondary}
                        >
                            {"✏️"}
                        </Button>
                        <Button
                            onclick={props.on_delete.reform(move |_| delete_id.clone())}
                            variant={ButtonVariant::Danger}
                        >
                            {"🗑️"}
                        </Button>
                    </div>
                }
            })}
        </div>
    }
}
