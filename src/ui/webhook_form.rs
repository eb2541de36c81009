/// Add/edit webhook form

use patternfly_yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::webhook::DeliveryMethod;

#[derive(Properties, PartialEq)]
pub struct WebhookFormProps {
    pub title: AttrValue,
    pub label: AttrValue,
    pub url: AttrValue,
    pub method: DeliveryMethod,
    pub label_ref: NodeRef,
    pub on_label_input: Callback<String>,
    pub on_url_input: Callback<String>,
    pub on_method_change: Callback<DeliveryMethod>,
    pub on_save: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(WebhookForm)]
pub fn webhook_form(props: &WebhookFormProps) -> Html {
    let on_label_input = props.on_label_input.reform(|e: InputEvent| {
        e.target_unchecked_into::<HtmlInputElement>().value()
    });
    let on_url_input = props.on_url_input.reform(|e: InputEvent| {
        e.target_unchecked_into::<HtmlInputElement>().value()
    });

    let on_method_change = {
        let on_method_change = props.on_method_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                match select.value().parse::<DeliveryMethod>() {
                    Ok(method) => on_method_change.emit(method),
                    Err(err) => log::warn!("{}", err),
                }
            }
        })
    };

    html! {
        <div class="form-card">
            <h2 class="form-title">{props.title.to_string()}</h2>

            <label for="webhookLabel">{"Label"}</label>
            <input
                id="webhookLabel"
                type="text"
                placeholder="e.g. Job tracker"
                ref={props.label_ref.clone()}
                value={props.label.clone()}
                oninput={on_label_input}
                class="form-input"
            />

            <label for="webhookUrl">{"Webhook URL"}</label>
            <input
                id="webhookUrl"
                type="url"
                placeholder="https://hook.example.com/..."
                value={props.url.clone()}
                oninput={on_url_input}
                class="form-input"
            />

            <label for="webhookMethod">{"Delivery"}</label>
            <select id="webhookMethod" class="form-input" onchange={on_method_change}>
                {for DeliveryMethod::ALL.iter().map(|method| html! {
                    <option value={method.as_str()} selected={*method == props.method}>
                        {method.label()}
                    </option>
                })}
            </select>

            <div class="form-actions">
                <Button onclick={props.on_save.reform(|_| ())}>
                    {"Save"}
                </Button>
                <Button
                    onclick={props.on_cancel.reform(|_| ())}
                    variant={ButtonVariant::Secondary}
                >
                    {"Cancel"}
                </Button>
            </div>
        </div>
    }
}
