//! Submission gateway contract
//!
//! One best-effort attempt per submission: no retry, and every transport
//! problem collapses into `SubmissionOutcome::Failure`.

use super::state::FormSnapshot;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result tag of a submission; carries no payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Pending,
    Success,
    Failure,
}

/// Transport-level submission errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("failed to serialize payload: {0}")]
    Serialize(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Sends a validated snapshot to the remote endpoint.
///
/// Not `Send`: browser futures live on the single UI thread.
#[async_trait(?Send)]
pub trait SubmissionGateway {
    /// Deliver the payload; returns the opaque response body on success
    async fn send(&self, snapshot: &FormSnapshot) -> Result<String, SubmitError>;

    /// Deliver the payload and collapse the result into an outcome tag
    async fn submit(&self, snapshot: &FormSnapshot) -> SubmissionOutcome {
        match self.send(snapshot).await {
            Ok(body) => {
                log::info!("registration submitted: {}", body);
                SubmissionOutcome::Success
            }
            Err(e) => {
                log::error!("registration submit failed: {}", e);
                SubmissionOutcome::Failure
            }
        }
    }
}
