use async_trait::async_trait;
use contracts::shared::form::{FormSnapshot, SubmissionGateway, SubmitError};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

pub const REGISTRATION_PATH: &str = "/api/registrations";

/// Time a registration request may stay unsettled before it counts as failed
pub const SUBMIT_TIMEOUT_MS: u32 = 10_000;

/// Posts the form snapshot as JSON to the registration endpoint
pub struct HttpSubmissionGateway {
    url: String,
}

impl HttpSubmissionGateway {
    pub fn new() -> Self {
        Self::with_url(api_url(REGISTRATION_PATH))
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for HttpSubmissionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn send(&self, snapshot: &FormSnapshot) -> Result<String, SubmitError> {
        let response = Request::post(&self.url)
            .json(snapshot)
            .map_err(|e| SubmitError::Serialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(SubmitError::Status(response.status()));
        }

        response
            .text()
            .await
            .map_err(|e| SubmitError::Body(e.to_string()))
    }
}
