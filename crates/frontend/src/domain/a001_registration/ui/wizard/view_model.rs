use super::model::{HttpSubmissionGateway, SUBMIT_TIMEOUT_MS};
use contracts::domain::a001_registration::new_registration_form;
use contracts::shared::form::{
    FieldUpdate, FieldView, Notification, NotificationMessage, NotificationTicket, Phase,
    StepperView, SubmissionGateway, SubmissionOutcome, Transition, TransitionController,
    NOTIFICATION_TIMEOUT_MS,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

/// Session store of the registration form.
/// The controller is the only mutator of the form; the banner has its own signal.
#[derive(Clone, Copy)]
pub struct RegistrationViewModel {
    pub form: RwSignal<TransitionController>,
    pub notification: RwSignal<Notification>,
}

impl RegistrationViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(new_registration_form()),
            notification: RwSignal::new(Notification::new()),
        }
    }

    pub fn field_view(&self, name: &str) -> Option<FieldView> {
        self.form.with(|f| f.field_view(name))
    }

    pub fn stepper(&self) -> StepperView {
        self.form.with(|f| f.stepper())
    }

    pub fn banner(&self) -> Option<NotificationMessage> {
        self.notification.with(|n| n.message())
    }

    /// Raw edit from an input. Always notifies, so a filtered keystroke
    /// re-renders the previous value.
    pub fn on_input(&self, name: &str, raw: String) {
        self.form.update(|f| {
            if let FieldUpdate::Filtered = f.set_field(name, &raw) {
                log::debug!("keystroke filtered for `{}`", name);
            }
        });
    }

    pub fn request_review(&self) {
        self.form.update(|f| {
            if let Transition::Refused(errors) = f.request_review() {
                log::debug!("review refused: {:?}", errors.fields().collect::<Vec<_>>());
            }
        });
    }

    pub fn request_edit(&self) {
        self.form.update(|f| {
            f.request_edit();
        });
    }

    pub fn cancel(&self) {
        self.form.update(|f| {
            f.cancel();
        });
    }

    /// Form submit (button or Enter): review from editing, submit from review
    pub fn submit_pressed(&self) {
        match self.form.with_untracked(|f| f.phase()) {
            Phase::Editing => self.request_review(),
            Phase::Review => self.confirm_submit(),
        }
    }

    /// Send the reviewed values. The form resets right away; the outcome
    /// only drives the banner, which expires after `NOTIFICATION_TIMEOUT_MS`.
    /// A request still unsettled after `SUBMIT_TIMEOUT_MS` counts as failed.
    pub fn confirm_submit(&self) {
        let Some(snapshot) = self.form.try_update(|f| f.begin_submit()).flatten() else {
            return;
        };

        let form = self.form;
        let notification = self.notification;
        let Some(pending) = notification.try_update(|n| n.show(SubmissionOutcome::Pending)) else {
            form.update(|f| f.finish_submit());
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(SUBMIT_TIMEOUT_MS).await;
            if settle(form, notification, pending) {
                log::error!("registration submit timed out after {} ms", SUBMIT_TIMEOUT_MS);
                flash(notification, SubmissionOutcome::Failure);
            }
        });

        wasm_bindgen_futures::spawn_local(async move {
            let outcome = HttpSubmissionGateway::new().submit(&snapshot).await;
            if settle(form, notification, pending) {
                flash(notification, outcome);
            }
        });
    }
}

/// Release the pending lock once per submission. Whichever of the response
/// and the timeout comes first wins; the loser finds `pending` superseded.
fn settle(
    form: RwSignal<TransitionController>,
    notification: RwSignal<Notification>,
    pending: NotificationTicket,
) -> bool {
    if !notification.with_untracked(|n| n.is_current(pending)) {
        return false;
    }
    form.update(|f| f.finish_submit());
    true
}

/// Show `outcome` now and expire it after `NOTIFICATION_TIMEOUT_MS`
fn flash(notification: RwSignal<Notification>, outcome: SubmissionOutcome) {
    let Some(ticket) = notification.try_update(|n| n.show(outcome)) else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(NOTIFICATION_TIMEOUT_MS).await;
        notification.update(|n| {
            n.expire(ticket);
        });
    });
}

impl Default for RegistrationViewModel {
    fn default() -> Self {
        Self::new()
    }
}
