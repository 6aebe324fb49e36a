//! Registration wizard UI module
//!
//! MVVM split:
//! - model.rs: HTTP submission gateway
//! - view_model.rs: session store with commands
//! - view.rs: Leptos components (pure UI)

mod model;
mod view;
mod view_model;

pub use model::HttpSubmissionGateway;
pub use view::RegistrationWizard;
pub use view_model::RegistrationViewModel;
