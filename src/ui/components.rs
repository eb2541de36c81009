/// Reusable UI components

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::status::{Status, StatusKind};

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    #[prop_or_default]
    pub status: Option<Status>,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    let Some(status) = &props.status else {
        return html! {};
    };

    let alert_type = match status.kind {
        StatusKind::Info => AlertType::Info,
        StatusKind::Success => AlertType::Success,
        StatusKind::Error => AlertType::Danger,
    };

    html! {
        <div class="status" role="status">
            if status.kind == StatusKind::Info {
                <Spinner />
            }
            <Alert r#type={alert_type} title={status.message.clone()} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EmptyMessageProps {
    #[prop_or_default]
    pub icon: Option<String>,
    pub children: Children,
}

#[function_component(EmptyMessage)]
pub fn empty_message(props: &EmptyMessageProps) -> Html {
    html! {
        <div class="empty-state">
            if let Some(icon) = &props.icon {
                <div class="empty-state-icon">{icon}</div>
            }
            {props.children.clone()}
        </div>
    }
}
