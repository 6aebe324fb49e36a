pub mod alert;
pub mod button;
pub mod input;
pub mod select;
pub mod stepper;

pub use alert::AlertBanner;
pub use button::Button;
pub use input::Input;
pub use select::Select;
pub use stepper::Stepper;
