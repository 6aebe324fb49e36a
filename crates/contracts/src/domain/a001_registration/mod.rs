//! Registration form: field set, rules and wire types

pub mod aggregate;
pub mod schema;

pub use aggregate::{RegistrationDto, RegistrationReceipt};
pub use schema::{
    fields, new_registration_form, EMAIL_PATTERN, NIP_LENGTH, PASSWORD_MIN_LENGTH, PHONE_LENGTH,
    REGISTRATION_SCHEMA, ROLES, ROLE_IDS,
};
