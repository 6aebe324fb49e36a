use contracts::shared::form::NotificationMessage;
use leptos::prelude::*;

/// Transient banner for submission outcomes; renders nothing when empty
#[component]
pub fn AlertBanner(#[prop(into)] message: Signal<Option<NotificationMessage>>) -> impl IntoView {
    move || {
        message.get().map(|m| {
            view! {
                <div class=format!("alert alert--{}", m.severity.as_str()) role="status">
                    <strong class="alert__title">{m.title}</strong>
                    <span class="alert__text">{m.text}</span>
                </div>
            }
        })
    }
}
