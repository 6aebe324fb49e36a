use super::view_model::RegistrationViewModel;
use crate::shared::components::ui::{AlertBanner, Button, Input, Select, Stepper};
use crate::shared::icons::icon;
use contracts::domain::a001_registration::REGISTRATION_SCHEMA;
use contracts::shared::form::{FieldSchema, InputKind, Phase};
use leptos::prelude::*;

#[component]
pub fn RegistrationWizard() -> impl IntoView {
    let vm = use_context::<RegistrationViewModel>()
        .expect("RegistrationViewModel not found in component tree");

    let in_review = move || vm.stepper().phase == Phase::Review;

    view! {
        <AlertBanner message=Signal::derive(move || vm.banner()) />

        <div class="details-container registration-wizard">
            <div class="details-header">
                <Stepper
                    steps=Phase::STEPS.to_vec()
                    active=Signal::derive(move || vm.stepper().active_step)
                />
            </div>

            <form
                class="details-form"
                novalidate=true
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    vm.submit_pressed();
                }
            >
                <Show when=in_review>
                    <h4 class="review-title">"Is everything correct?"</h4>
                </Show>

                {REGISTRATION_SCHEMA
                    .fields
                    .iter()
                    .map(|field| view! { <FormField vm=vm field=field /> })
                    .collect_view()}

                <div class="details-actions">
                    <Show
                        when=in_review
                        fallback=move || view! {
                            <Button on_click=Callback::new(move |_| vm.request_review())>
                                {icon("check")}
                                "Check"
                            </Button>
                        }
                    >
                        <Button
                            variant="secondary"
                            on_click=Callback::new(move |_| vm.request_edit())
                        >
                            {icon("edit")}
                            "Edit"
                        </Button>
                        <Button
                            variant="secondary"
                            on_click=Callback::new(move |_| vm.cancel())
                        >
                            {icon("cancel")}
                            "Cancel"
                        </Button>
                        <Button
                            variant="success"
                            button_type="submit"
                            disabled=Signal::derive(move || vm.stepper().submitting)
                        >
                            {icon("send")}
                            "Register"
                        </Button>
                    </Show>
                </div>
            </form>
        </div>
    }
}

/// One schema field bound to the view model
#[component]
fn FormField(vm: RegistrationViewModel, field: &'static FieldSchema) -> impl IntoView {
    let name = field.name;
    let current = Signal::derive(move || vm.field_view(name));
    let value = Signal::derive(move || current.get().map(|v| v.value).unwrap_or_default());
    let error = Signal::derive(move || current.get().and_then(|v| v.error));
    let disabled = Signal::derive(move || current.get().map(|v| v.disabled).unwrap_or(true));
    let on_edit = Callback::new(move |raw: String| vm.on_input(name, raw));

    match field.input {
        InputKind::Select => {
            let options: Vec<(String, String)> = field
                .options
                .iter()
                .map(|o| (o.value.to_string(), o.label.to_string()))
                .collect();
            view! {
                <Select
                    id=name
                    label=field.label
                    value=value
                    options=options
                    placeholder=format!("Choose {}", field.label.to_lowercase())
                    error=error
                    disabled=disabled
                    required=field.is_required()
                    on_change=on_edit
                />
            }
            .into_any()
        }
        kind => view! {
            <Input
                id=name
                label=field.label
                value=value
                input_type=kind.as_str()
                error=error
                disabled=disabled
                required=field.is_required()
                on_input=on_edit
            />
        }
        .into_any(),
    }
}
