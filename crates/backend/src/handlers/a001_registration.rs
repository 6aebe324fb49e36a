use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use contracts::domain::a001_registration::{RegistrationDto, RegistrationReceipt};

use crate::shared::error::ApiError;

/// POST /api/registrations
///
/// Accepts the form payload as is and acknowledges it with a receipt.
/// Passwords never reach the log.
pub async fn create(
    payload: Result<Json<RegistrationDto>, JsonRejection>,
) -> Result<(StatusCode, Json<RegistrationReceipt>), ApiError> {
    let Json(dto) = payload.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;

    let receipt = RegistrationReceipt::new();
    tracing::info!(
        id = %receipt.id,
        registration = ?dto.redacted(),
        "registration received"
    );

    Ok((StatusCode::CREATED, Json(receipt)))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use contracts::domain::a001_registration::RegistrationReceipt;
    use tower::ServiceExt;

    fn post(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/registrations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_receipt() {
        let body = r#"{"email":"a@b.com","password":"Abcdef1!","confirmPassword":"Abcdef1!","nip":"1234567890","phone":"","role":"1"}"#;

        let response = configure_routes().oneshot(post(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let receipt: RegistrationReceipt = serde_json::from_slice(&bytes).unwrap();
        assert!(!receipt.id.is_nil());
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let body = r#"{"password":"Abcdef1!","confirmPassword":"Abcdef1!","nip":"1234567890","role":"1"}"#;

        let response = configure_routes().oneshot(post(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = configure_routes().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
