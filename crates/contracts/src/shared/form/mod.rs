//! Schema-driven multi-step form engine
//!
//! - schema.rs: static field descriptions (rules, pre-filters, choices)
//! - validator.rs: generic rule evaluation
//! - state.rs: values + phase
//! - controller.rs: guarded phase transitions and the render boundary
//! - submission.rs: gateway contract and outcome
//! - notification.rs: transient outcome banner

mod controller;
mod notification;
mod schema;
mod state;
mod submission;
mod validator;

pub use controller::{FieldView, StepperView, Transition, TransitionController};
pub use notification::{
    Notification, NotificationMessage, NotificationTicket, Severity, NOTIFICATION_TIMEOUT_MS,
};
pub use schema::{
    CharClass, FieldSchema, FormSchema, InputFilter, InputKind, Rule, RuleCheck, SchemaError,
    SelectOption,
};
pub use state::{FieldUpdate, FormSnapshot, FormState, Phase};
pub use submission::{SubmissionGateway, SubmissionOutcome, SubmitError};
pub use validator::{validate, validate_field, FieldError, FieldLookup, ValidationResult};
