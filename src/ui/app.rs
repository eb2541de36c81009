/// Main page: share panel, webhook list and the add/edit form

use gloo_timers::future::TimeoutFuture;
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::AppConfig;
use crate::dispatch::{timestamp_now, Dispatcher};
use crate::form::{delete_webhook, EditTarget, FormController};
use crate::http;
use crate::share;
use crate::status::Status;
use crate::storage::{LocalStorage, WebhookStore};
use crate::ui::components::StatusBanner;
use crate::ui::share_panel::SharePanel;
use crate::ui::status::{use_status, StatusHandle};
use crate::ui::webhook_form::WebhookForm;
use crate::ui::webhook_list::WebhookList;
use crate::webhook::{DeliveryMethod, WebhookId};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_global());
    let store = {
        let key = config.storage_key.clone();
        use_state(move || WebhookStore::load(LocalStorage, &key))
    };
    let form = {
        let default_method = config.default_method;
        use_state(move || FormController::new(default_method))
    };
    let shared = use_memo((), |_| share::from_location());
    let dispatcher = use_mut_ref(Dispatcher::default);
    let force_update = use_force_update();
    let status = use_status(config.status_timeout_ms);
    let label_ref = use_node_ref();

    // Focus the label input whenever the form opens on a new target
    {
        let label_ref = label_ref.clone();
        use_effect_with(form.target().cloned(), move |target| {
            if target.is_some() {
                if let Some(input) = label_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let on_add = {
        let store = store.clone();
        let form = form.clone();
        let status = status.clone();

        Callback::from(move |_: MouseEvent| {
            open_form(&store, &form, &status, EditTarget::New);
        })
    };

    let on_edit = {
        let store = store.clone();
        let form = form.clone();
        let status = status.clone();

        Callback::from(move |id: WebhookId| {
            open_form(&store, &form, &status, EditTarget::Existing(id));
        })
    };

    let on_delete = {
        let store = store.clone();
        let form = form.clone();
        let status = status.clone();

        Callback::from(move |id: WebhookId| {
            let confirmed = confirm("Are you sure you want to delete this webhook?");
            let mut new_store = (*store).clone();
            let mut new_form = (*form).clone();

            match delete_webhook(&mut new_store, &mut new_form, &id, confirmed) {
                Ok(Some(message)) => {
                    store.set(new_store);
                    form.set(new_form);
                    status.show(message);
                }
                Ok(None) => {}
                Err(e) => status.show(Status::error(e.to_string())),
            }
        })
    };

    let on_save = {
        let store = store.clone();
        let form = form.clone();
        let status = status.clone();

        Callback::from(move |_: ()| {
            let mut new_store = (*store).clone();
            let mut new_form = (*form).clone();

            match new_form.submit(&mut new_store) {
                Ok(message) => {
                    store.set(new_store);
                    form.set(new_form);
                    status.show(message);
                }
                Err(e) => status.show(Status::error(e.to_string())),
            }
        })
    };

    let on_cancel = {
        let form = form.clone();
        Callback::from(move |_: ()| {
            let mut new_form = (*form).clone();
            new_form.cancel();
            form.set(new_form);
        })
    };

    let on_label_input = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut new_form = (*form).clone();
            new_form.set_label(value);
            form.set(new_form);
        })
    };

    let on_url_input = {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut new_form = (*form).clone();
            new_form.set_url(value);
            form.set(new_form);
        })
    };

    let on_method_change = {
        let form = form.clone();
        Callback::from(move |method: DeliveryMethod| {
            let mut new_form = (*form).clone();
            new_form.set_method(method);
            form.set(new_form);
        })
    };

    // Send the shared link; the webhook is re-resolved by id at click time
    let on_send = {
        let store = store.clone();
        let shared = shared.clone();
        let dispatcher = dispatcher.clone();
        let status = status.clone();
        let force_update = force_update.clone();
        let redirect_delay_ms = config.redirect_delay_ms;

        Callback::from(move |id: WebhookId| {
            let Some(content) = (*shared).clone() else {
                return;
            };

            let begun = dispatcher
                .borrow_mut()
                .begin(&*store, &id, &content, &timestamp_now());
            let prepared = match begun {
                Ok(prepared) => prepared,
                Err(e) => {
                    status.show(Status::error(e.to_string()));
                    return;
                }
            };

            status.show(Status::info(format!("Sending to \"{}\"...", prepared.label)));
            force_update.force_update();

            let dispatcher = dispatcher.clone();
            let status = status.clone();
            let force_update = force_update.clone();

            spawn_local(async move {
                let result = http::send(&prepared.request).await;
                let outcome = dispatcher.borrow_mut().complete(&prepared, result);
                force_update.force_update();
                status.show(outcome.status());

                if let Some(delay_ms) = outcome.redirect_after(redirect_delay_ms) {
                    TimeoutFuture::new(delay_ms).await;
                    share::return_to_base();
                }
            });
        })
    };

    let webhooks = store.webhooks().to_vec();
    let pending = dispatcher.borrow().pending();

    html! {
        <div class="container">
            <h1 class="main-title">{"Webhook Sender"}</h1>

            <StatusBanner status={status.current()} />

            if let Some(content) = (*shared).clone() {
                <SharePanel
                    shared={content}
                    webhooks={webhooks.clone()}
                    pending={pending}
                    on_send={on_send}
                />
            }

            <div class="card">
                <h2 class="card-title">{"Your Webhooks"}</h2>
                <WebhookList webhooks={webhooks} on_edit={on_edit} on_delete={on_delete} />
                if !form.is_open() {
                    <Button onclick={on_add} block={true}>
                        {"➕ Add Webhook"}
                    </Button>
                }
            </div>

            if form.is_open() {
                <WebhookForm
                    title={form.title()}
                    label={form.label().to_string()}
                    url={form.url().to_string()}
                    method={form.method()}
                    label_ref={label_ref.clone()}
                    on_label_input={on_label_input}
                    on_url_input={on_url_input}
                    on_method_change={on_method_change}
                    on_save={on_save}
                    on_cancel={on_cancel}
                />
            }

            <p class="footer">
                {"Webhook Sender v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

fn open_form(
    store: &UseStateHandle<WebhookStore>,
    form: &UseStateHandle<FormController>,
    status: &StatusHandle,
    target: EditTarget,
) {
    let mut new_form = (**form).clone();
    match new_form.open(&**store, target) {
        Ok(()) => form.set(new_form),
        Err(e) => status.show(Status::error(e.to_string())),
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
