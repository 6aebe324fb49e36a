use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schema::fields;
use crate::shared::form::FormSnapshot;

// ============================================================================
// Wire types
// ============================================================================

/// Registration payload as posted by the form.
/// Field names match the form schema (`confirmPassword` is camelCase).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDto {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub nip: String,
    #[serde(default)]
    pub phone: String,
    pub role: String,
}

impl RegistrationDto {
    /// Copy with both password fields masked, for logging
    pub fn redacted(&self) -> Self {
        Self {
            password: "***".to_string(),
            confirm_password: "***".to_string(),
            ..self.clone()
        }
    }
}

impl From<&FormSnapshot> for RegistrationDto {
    fn from(snapshot: &FormSnapshot) -> Self {
        let get = |name: &str| snapshot.get(name).unwrap_or_default().to_string();
        Self {
            email: get(fields::EMAIL),
            password: get(fields::PASSWORD),
            confirm_password: get(fields::CONFIRM_PASSWORD),
            nip: get(fields::NIP),
            phone: get(fields::PHONE),
            role: get(fields::ROLE),
        }
    }
}

/// Response of the registration endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
}

impl RegistrationReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

impl Default for RegistrationReceipt {
    fn default() -> Self {
        Self::new()
    }
}
