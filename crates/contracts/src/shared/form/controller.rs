//! Two-phase transition controller
//!
//! ```text
//!   Editing --request_review [valid]--> Review
//!   Review  --request_edit-----------> Editing   (values kept)
//!   Review  --cancel-----------------> Editing   (values cleared)
//!   Review  --confirm_submit---------> Editing   (values cleared, gateway called)
//! ```
//!
//! Requests that do not apply to the current phase are no-ops. A submission in
//! flight blocks a second one until `finish_submit`.

use super::schema::{FormSchema, InputKind, SelectOption};
use super::state::{FieldUpdate, FormSnapshot, FormState, Phase};
use super::submission::{SubmissionGateway, SubmissionOutcome};
use super::validator::{validate, validate_field, ValidationResult};

/// Result of a phase-change request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Phase changed to the given one
    Advanced(Phase),
    /// Request does not apply to the current phase
    Unchanged,
    /// Guard failed; the errors explain why
    Refused(ValidationResult),
}

impl Transition {
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced(_))
    }
}

/// Everything the render layer needs for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub options: &'static [SelectOption],
    pub required: bool,
    pub value: String,
    pub error: Option<String>,
    pub disabled: bool,
    pub highlighted: bool,
}

/// Stepper indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperView {
    pub phase: Phase,
    pub active_step: usize,
    pub can_advance: bool,
    pub submitting: bool,
}

/// Owns the form state and guards its phase changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionController {
    state: FormState,
    touched: Vec<bool>,
    reveal_errors: bool,
    submitting: bool,
}

impl TransitionController {
    pub fn new(schema: &'static FormSchema) -> Self {
        debug_assert_eq!(schema.check(), Ok(()), "malformed schema `{}`", schema.name);
        Self {
            state: FormState::new(schema),
            touched: vec![false; schema.len()],
            reveal_errors: false,
            submitting: false,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.state.snapshot()
    }

    pub fn validation(&self) -> ValidationResult {
        validate(self.state.schema(), &self.state)
    }

    /// Whether `request_review` would succeed right now
    pub fn can_advance(&self) -> bool {
        self.phase() == Phase::Editing && self.guard_holds(&self.validation())
    }

    /// Edit one field; marks it touched when the value changed
    pub fn set_field(&mut self, name: &str, raw: &str) -> FieldUpdate {
        let update = self.state.set_field(name, raw);
        if update.is_applied() {
            if let Some(idx) = self.state.schema().index_of(name) {
                self.touched[idx] = true;
            }
        }
        update
    }

    /// Editing -> Review, when the values validate and no required field is blank
    pub fn request_review(&mut self) -> Transition {
        if self.phase() == Phase::Review {
            return Transition::Unchanged;
        }

        let result = self.validation();
        if !self.guard_holds(&result) {
            log::debug!(
                "{}: review refused, {} invalid field(s)",
                self.state.schema().name,
                result.len()
            );
            self.reveal_errors = true;
            return Transition::Refused(result);
        }

        self.state.set_phase(Phase::Review);
        log::debug!("{}: editing -> review", self.state.schema().name);
        Transition::Advanced(Phase::Review)
    }

    /// Review -> Editing, keeping every value
    pub fn request_edit(&mut self) -> Transition {
        if self.phase() == Phase::Editing {
            return Transition::Unchanged;
        }
        self.state.set_phase(Phase::Editing);
        log::debug!("{}: review -> editing", self.state.schema().name);
        Transition::Advanced(Phase::Editing)
    }

    /// Review -> Editing, discarding every value
    pub fn cancel(&mut self) -> Transition {
        if self.phase() == Phase::Editing {
            return Transition::Unchanged;
        }
        self.reset();
        log::debug!("{}: review cancelled", self.state.schema().name);
        Transition::Advanced(Phase::Editing)
    }

    /// First half of a submission: take the snapshot, reset the form and
    /// hold the pending lock. `None` outside review or while another
    /// submission is in flight.
    pub fn begin_submit(&mut self) -> Option<FormSnapshot> {
        if self.phase() != Phase::Review {
            return None;
        }
        if self.submitting {
            log::warn!("{}: submission already in flight", self.state.schema().name);
            return None;
        }

        let snapshot = self.state.snapshot();
        self.reset();
        self.submitting = true;
        log::debug!("{}: review -> editing (submitted)", self.state.schema().name);
        Some(snapshot)
    }

    /// Second half of a submission: release the pending lock
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Submit the reviewed values through `gateway`.
    ///
    /// The form returns to a blank editing phase whatever the remote outcome;
    /// the outcome is only meant for the transient banner.
    pub async fn confirm_submit<G>(&mut self, gateway: &G) -> Option<SubmissionOutcome>
    where
        G: SubmissionGateway + ?Sized,
    {
        let snapshot = self.begin_submit()?;
        let outcome = gateway.submit(&snapshot).await;
        self.finish_submit();
        Some(outcome)
    }

    pub fn field_view(&self, name: &str) -> Option<FieldView> {
        let idx = self.state.schema().index_of(name)?;
        Some(self.build_field_view(idx))
    }

    pub fn field_views(&self) -> Vec<FieldView> {
        (0..self.state.schema().len())
            .map(|idx| self.build_field_view(idx))
            .collect()
    }

    pub fn stepper(&self) -> StepperView {
        let phase = self.phase();
        StepperView {
            phase,
            active_step: phase.step_index(),
            can_advance: self.can_advance(),
            submitting: self.submitting,
        }
    }

    fn build_field_view(&self, idx: usize) -> FieldView {
        let field = &self.state.schema().fields[idx];
        let value = self.state.value(field.name).unwrap_or_default().to_string();
        let error = if self.touched[idx] || self.reveal_errors {
            validate_field(field, &self.state)
        } else {
            None
        };

        FieldView {
            name: field.name,
            label: field.label,
            input: field.input,
            options: field.options,
            required: field.is_required(),
            highlighted: error.is_some(),
            disabled: self.phase() == Phase::Review,
            value,
            error,
        }
    }

    fn guard_holds(&self, result: &ValidationResult) -> bool {
        result.is_valid()
            && self
                .state
                .schema()
                .fields
                .iter()
                .filter(|field| field.is_required())
                .all(|field| !self.state.value(field.name).unwrap_or_default().is_empty())
    }

    fn reset(&mut self) {
        self.state.reset();
        self.touched.iter_mut().for_each(|t| *t = false);
        self.reveal_errors = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_registration::{fields, new_registration_form, NIP_LENGTH};
    use crate::shared::form::schema::{FieldSchema, InputFilter, Rule, RuleCheck};
    use crate::shared::form::submission::SubmitError;
    use async_trait::async_trait;
    use std::cell::RefCell;

    struct FakeGateway {
        fail: bool,
        sent: RefCell<Vec<FormSnapshot>>,
    }

    impl FakeGateway {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl SubmissionGateway for FakeGateway {
        async fn send(&self, snapshot: &FormSnapshot) -> Result<String, SubmitError> {
            self.sent.borrow_mut().push(snapshot.clone());
            if self.fail {
                Err(SubmitError::Network("connection refused".to_string()))
            } else {
                Ok("{\"id\":\"1\"}".to_string())
            }
        }
    }

    static UNCOMPILABLE_PATTERN: FormSchema = FormSchema {
        name: "uncompilable",
        fields: &[FieldSchema {
            name: "code",
            label: "Code",
            input: InputKind::Text,
            rules: &[RuleCheck::new(Rule::Pattern("[0-9"), "digits only")],
            filter: InputFilter::none(),
            options: &[],
        }],
    };

    const SCENARIO_A: [(&str, &str); 6] = [
        (fields::EMAIL, "a@b.com"),
        (fields::PASSWORD, "Abcdef1!"),
        (fields::CONFIRM_PASSWORD, "Abcdef1!"),
        (fields::NIP, "1234567890"),
        (fields::PHONE, ""),
        (fields::ROLE, "1"),
    ];

    fn filled(values: &[(&str, &str)]) -> TransitionController {
        let mut form = new_registration_form();
        for (name, value) in values {
            form.set_field(name, value);
        }
        form
    }

    fn with(name: &str, value: &str) -> TransitionController {
        let mut form = filled(&SCENARIO_A);
        form.set_field(name, value);
        form
    }

    fn in_review() -> TransitionController {
        let mut form = filled(&SCENARIO_A);
        assert!(form.request_review().is_advanced());
        form
    }

    #[test]
    fn test_scenario_a_valid_form_reaches_review() {
        let mut form = filled(&SCENARIO_A);
        assert!(form.validation().is_valid());
        assert!(form.can_advance());
        assert_eq!(form.request_review(), Transition::Advanced(Phase::Review));
        assert_eq!(form.phase(), Phase::Review);
    }

    #[test]
    fn test_scenario_b_confirmation_mismatch_refused() {
        let mut form = with(fields::CONFIRM_PASSWORD, "Abcdef1!!");
        let result = form.validation();
        assert_eq!(result.fields().collect::<Vec<_>>(), vec![fields::CONFIRM_PASSWORD]);

        match form.request_review() {
            Transition::Refused(errors) => assert_eq!(errors, result),
            other => panic!("expected refusal, got {:?}", other),
        }
        assert_eq!(form.phase(), Phase::Editing);
    }

    #[test]
    fn test_scenario_c_short_nip_refused() {
        let mut form = with(fields::NIP, "12345");
        let result = form.validation();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.error(fields::NIP),
            Some(format!("NIP must have {} numbers", NIP_LENGTH).as_str())
        );
        assert!(!form.request_review().is_advanced());
        assert_eq!(form.phase(), Phase::Editing);
    }

    #[tokio::test]
    async fn test_scenario_d_failed_transport_still_resets() {
        let mut form = in_review();
        let gateway = FakeGateway::new(true);

        let outcome = form.confirm_submit(&gateway).await;

        assert_eq!(outcome, Some(SubmissionOutcome::Failure));
        assert_eq!(form.phase(), Phase::Editing);
        assert!(form.snapshot().is_blank());
        assert!(!form.is_submitting());
        assert_eq!(gateway.sent.borrow()[0].get(fields::EMAIL), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_successful_submit_resets() {
        let mut form = in_review();
        let gateway = FakeGateway::new(false);

        assert_eq!(form.confirm_submit(&gateway).await, Some(SubmissionOutcome::Success));
        assert_eq!(form.phase(), Phase::Editing);
        assert!(form.snapshot().is_blank());
        assert!(form.field_views().iter().all(|view| view.error.is_none()));
    }

    #[tokio::test]
    async fn test_confirm_submit_in_editing_is_noop() {
        let mut form = filled(&SCENARIO_A);
        let gateway = FakeGateway::new(false);

        assert_eq!(form.confirm_submit(&gateway).await, None);
        assert!(gateway.sent.borrow().is_empty());
        assert_eq!(form.snapshot().get(fields::EMAIL), Some("a@b.com"));
    }

    #[test]
    fn test_scenario_e_blank_phone_is_optional() {
        let mut form = with(fields::PHONE, "");
        assert!(form.validation().is_valid());
        assert!(form.request_review().is_advanced());
    }

    #[test]
    fn test_phone_with_wrong_length_is_refused() {
        let mut form = with(fields::PHONE, "1234");
        assert_eq!(form.validation().error(fields::PHONE), Some("Phone must be 9 numbers"));
        assert!(!form.request_review().is_advanced());
    }

    #[test]
    fn test_idempotent_requests() {
        let mut form = filled(&SCENARIO_A);
        let before = form.clone();
        assert_eq!(form.request_edit(), Transition::Unchanged);
        assert_eq!(form.cancel(), Transition::Unchanged);
        assert_eq!(form, before);

        let mut form = in_review();
        let before = form.clone();
        assert_eq!(form.request_review(), Transition::Unchanged);
        assert_eq!(form, before);
    }

    #[test]
    fn test_request_edit_keeps_values() {
        let mut form = in_review();
        assert_eq!(form.request_edit(), Transition::Advanced(Phase::Editing));
        assert_eq!(form.snapshot(), filled(&SCENARIO_A).snapshot());
    }

    #[test]
    fn test_cancel_from_review_resets() {
        let mut form = in_review();
        assert!(form.cancel().is_advanced());
        assert_eq!(form.phase(), Phase::Editing);
        assert!(form.snapshot().is_blank());
    }

    #[test]
    fn test_no_write_in_review() {
        let mut form = in_review();
        let before = form.snapshot();
        for (name, _) in SCENARIO_A {
            assert_eq!(form.set_field(name, "x"), FieldUpdate::Locked);
        }
        assert_eq!(form.snapshot(), before);
        assert!(form.field_views().iter().all(|view| view.disabled));
    }

    #[test]
    fn test_confirmation_coupling_ignores_password_validity() {
        let cases = [
            ("short", "short", false),
            ("short", "shorter", true),
            ("Abcdef1!", "Abcdef1!", false),
            ("Abcdef1!", "abcdef1!", true),
            ("", "x", true),
        ];
        for (password, confirmation, flagged) in cases {
            let mut form = filled(&SCENARIO_A);
            form.set_field(fields::PASSWORD, password);
            form.set_field(fields::CONFIRM_PASSWORD, confirmation);
            assert_eq!(
                form.validation().has_error(fields::CONFIRM_PASSWORD),
                flagged,
                "password {:?}, confirmation {:?}",
                password,
                confirmation
            );
        }
    }

    #[test]
    fn test_guard_matches_validation() {
        let variants = [
            (fields::EMAIL, ""),
            (fields::EMAIL, "ab.com"),
            (fields::PASSWORD, "abcdefgh"),
            (fields::ROLE, "7"),
            (fields::ROLE, ""),
            (fields::PHONE, "123456789"),
            (fields::NIP, "0000000000"),
        ];
        for (name, value) in variants {
            let mut form = with(name, value);
            let valid = form.validation().is_valid();
            assert_eq!(form.request_review().is_advanced(), valid, "{} = {:?}", name, value);
        }
    }

    #[test]
    fn test_errors_hidden_until_touched_or_refused() {
        let mut form = new_registration_form();
        assert!(form.field_views().iter().all(|view| view.error.is_none()));

        form.set_field(fields::EMAIL, "nope");
        let email = form.field_view(fields::EMAIL).unwrap();
        assert_eq!(email.error.as_deref(), Some("Email must contain @"));
        assert!(email.highlighted);
        assert!(form.field_view(fields::NIP).unwrap().error.is_none());

        assert!(!form.request_review().is_advanced());
        assert_eq!(
            form.field_view(fields::NIP).unwrap().error.as_deref(),
            Some("NIP is required")
        );
        assert!(form.field_view(fields::PHONE).unwrap().error.is_none());
    }

    #[test]
    fn test_pending_submission_blocks_second_submit() {
        let mut form = in_review();
        let first = form.begin_submit();
        assert!(first.is_some());
        assert!(form.stepper().submitting);

        for (name, value) in SCENARIO_A {
            form.set_field(name, value);
        }
        assert!(form.request_review().is_advanced());
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.phase(), Phase::Review);

        form.finish_submit();
        assert!(form.begin_submit().is_some());
    }

    #[test]
    fn test_stepper_view() {
        let form = filled(&SCENARIO_A);
        let stepper = form.stepper();
        assert_eq!(stepper.active_step, 0);
        assert!(stepper.can_advance);

        let form = in_review();
        let stepper = form.stepper();
        assert_eq!(stepper.phase, Phase::Review);
        assert_eq!(stepper.active_step, 1);
        assert!(!stepper.can_advance);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "malformed schema `uncompilable`")]
    fn test_malformed_schema_rejected_at_construction() {
        let _ = TransitionController::new(&UNCOMPILABLE_PATTERN);
    }
}
