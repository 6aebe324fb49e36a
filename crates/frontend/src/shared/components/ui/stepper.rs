use leptos::prelude::*;

/// Horizontal step indicator; steps before `active` render as completed
#[component]
pub fn Stepper(
    /// Step labels in order
    steps: Vec<&'static str>,
    /// Index of the current step
    #[prop(into)]
    active: Signal<usize>,
) -> impl IntoView {
    view! {
        <ol class="stepper">
            {steps
                .into_iter()
                .enumerate()
                .map(|(idx, label)| {
                    let state = move || {
                        let current = active.get();
                        if idx < current {
                            "stepper__step stepper__step--done"
                        } else if idx == current {
                            "stepper__step stepper__step--active"
                        } else {
                            "stepper__step"
                        }
                    };
                    view! {
                        <li class=state>
                            <span class="stepper__index">{idx + 1}</span>
                            <span class="stepper__label">{label}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}
