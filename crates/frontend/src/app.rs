use crate::domain::a001_registration::ui::wizard::{RegistrationViewModel, RegistrationWizard};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // One form session per page load
    provide_context(RegistrationViewModel::new());

    view! {
        <main class="app-shell">
            <RegistrationWizard />
        </main>
    }
}
