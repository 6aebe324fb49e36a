use crate::shared::form::{
    FieldSchema, FormSchema, InputFilter, InputKind, Rule, RuleCheck, SelectOption,
    TransitionController,
};

// ============================================================================
// Constraints
// ============================================================================

pub const NIP_LENGTH: usize = 10;
pub const PHONE_LENGTH: usize = 9;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Field names, shared by the schema, the wire payload and the render layer
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const NIP: &str = "nip";
    pub const PHONE: &str = "phone";
    pub const ROLE: &str = "role";
}

pub const ROLES: &[SelectOption] = &[
    SelectOption { value: "1", label: "Administrator" },
    SelectOption { value: "2", label: "Dyrektor" },
    SelectOption { value: "3", label: "Inspektor" },
    SelectOption { value: "4", label: "Kierownik" },
    SelectOption { value: "5", label: "Księgowy" },
    SelectOption { value: "6", label: "Pełnomocnik" },
];

/// Accepted `role` values; must list the `ROLES` values
pub const ROLE_IDS: &[&str] = &["1", "2", "3", "4", "5", "6"];

// ============================================================================
// Schema
// ============================================================================

pub static REGISTRATION_SCHEMA: FormSchema = FormSchema {
    name: "registration",
    fields: &[
        FieldSchema {
            name: fields::EMAIL,
            label: "Email",
            input: InputKind::Email,
            rules: &[
                RuleCheck::new(Rule::Required, "Email is required"),
                RuleCheck::new(Rule::Contains("@"), "Email must contain @"),
                RuleCheck::new(Rule::Contains("."), "Email must contain ."),
                RuleCheck::new(Rule::Pattern(EMAIL_PATTERN), "Email must be valid"),
            ],
            filter: InputFilter::none(),
            options: &[],
        },
        FieldSchema {
            name: fields::PASSWORD,
            label: "Password",
            input: InputKind::Password,
            rules: &[
                RuleCheck::new(Rule::Required, "Password is required"),
                RuleCheck::new(
                    Rule::MinLength(PASSWORD_MIN_LENGTH),
                    "Password must have at least {len} characters",
                ),
                RuleCheck::new(Rule::Pattern("[0-9]"), "Password requires a number"),
                RuleCheck::new(Rule::Pattern("[a-z]"), "Password requires a lowercase letter"),
                RuleCheck::new(Rule::Pattern("[A-Z]"), "Password requires an uppercase letter"),
                RuleCheck::new(Rule::Pattern("[^A-Za-z0-9_]"), "Password requires a symbol"),
            ],
            filter: InputFilter::none(),
            options: &[],
        },
        FieldSchema {
            name: fields::CONFIRM_PASSWORD,
            label: "Confirm Password",
            input: InputKind::Password,
            rules: &[
                RuleCheck::new(Rule::Required, "Confirm your password"),
                RuleCheck::new(Rule::EqualsField(fields::PASSWORD), "Password must be the same"),
            ],
            filter: InputFilter::none(),
            options: &[],
        },
        FieldSchema {
            name: fields::NIP,
            label: "NIP",
            input: InputKind::Text,
            rules: &[
                RuleCheck::new(Rule::Required, "NIP is required"),
                RuleCheck::new(Rule::ExactLength(NIP_LENGTH), "NIP must have {len} numbers"),
                RuleCheck::new(Rule::Digits, "NIP must contain only numbers"),
            ],
            filter: InputFilter::digits(NIP_LENGTH),
            options: &[],
        },
        FieldSchema {
            name: fields::PHONE,
            label: "Phone",
            input: InputKind::Text,
            rules: &[
                RuleCheck::new(Rule::ExactLength(PHONE_LENGTH), "Phone must be {len} numbers"),
                RuleCheck::new(Rule::Digits, "Phone must contain only numbers"),
            ],
            filter: InputFilter::digits(PHONE_LENGTH),
            options: &[],
        },
        FieldSchema {
            name: fields::ROLE,
            label: "Role",
            input: InputKind::Select,
            rules: &[
                RuleCheck::new(Rule::Required, "Role is required"),
                RuleCheck::new(Rule::OneOf(ROLE_IDS), "Choose a role from the list"),
            ],
            filter: InputFilter::none(),
            options: ROLES,
        },
    ],
};

/// Blank registration form in the editing phase
pub fn new_registration_form() -> TransitionController {
    TransitionController::new(&REGISTRATION_SCHEMA)
}
