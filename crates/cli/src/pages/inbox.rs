//! Demo inbox: stands in for the verification email.

use shared::{validation::require_email, VerificationStatus};

use crate::api::{ApiClient, ApiResult};
use crate::render::Notice;

pub async fn status(api: &ApiClient, email: &str) -> ApiResult<VerificationStatus> {
    let email = require_email(email)?;
    api.demo_verification_status(&email).await
}

pub async fn verify(api: &ApiClient, email: &str) -> Notice {
    let email = match require_email(email) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.to_string()),
    };
    match api.demo_verify(&email).await {
        Ok(_) => Notice::Success("Verified. You can now login.".to_string()),
        Err(err) => Notice::Failure(err.user_message("Verify failed.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{respond, FakeBackend};
    use axum::{http::StatusCode, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_status_and_verify() {
        let backend = FakeBackend::start(
            Router::new()
                .route(
                    "/api/demo/verification-status",
                    respond(
                        StatusCode::OK,
                        json!({"email": "a@uni-bayreuth.de", "created_at": "t1", "last_sent_at": "t2"}),
                    ),
                )
                .route(
                    "/api/demo/verify",
                    respond(StatusCode::NOT_FOUND, json!({"error": "No pending verification for this email"})),
                ),
        )
        .await;

        let pending = status(&backend.client(), "A@uni-bayreuth.de").await.unwrap();
        assert_eq!(pending.last_sent_at, "t2");

        let outcome = verify(&backend.client(), "a@uni-bayreuth.de").await;
        assert_eq!(
            outcome,
            Notice::Failure("No pending verification for this email".to_string())
        );
    }

    #[tokio::test]
    async fn test_blank_email_is_refused() {
        let backend = FakeBackend::start(Router::new()).await;
        assert_eq!(
            verify(&backend.client(), " ").await,
            Notice::Failure("Enter an email.".to_string())
        );
        assert!(status(&backend.client(), "").await.is_err());
        assert!(backend.calls().is_empty());
    }
}
