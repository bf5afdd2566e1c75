//! Login, registration and verification.

use anyhow::Result;
use shared::{session::normalize_email, validation::require_email, Session};

use crate::api::ApiClient;
use crate::render::Notice;
use crate::session::SessionStore;

/// Logs in and stores the email/role pair the server answered with.
pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Notice> {
    let email = normalize_email(email);
    let reply = match api.login(&email, password.trim()).await {
        Ok(reply) => reply,
        Err(err) => return Ok(Notice::Failure(err.user_message("Login failed."))),
    };

    let session = Session::new(
        reply.email.as_deref().unwrap_or(&email),
        reply.role.as_deref().unwrap_or(""),
    );
    store.save(&session)?;

    let next = if session.is_admin() {
        "Login successful. Admin commands: campusbook admin requests"
    } else {
        "Login successful. Browse rooms: campusbook rooms list"
    };
    Ok(Notice::Success(next.to_string()))
}

pub async fn register(api: &ApiClient, email: &str, password: &str) -> Notice {
    let email = match require_email(email) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.to_string()),
    };
    match api.register(&email, password.trim()).await {
        Ok(_) => Notice::Success(format!(
            "Created. Check the demo inbox: campusbook inbox status {email}"
        )),
        Err(err) => Notice::Failure(err.user_message("Registration failed.")),
    }
}

pub async fn verify(api: &ApiClient, email: &str, code: &str) -> Notice {
    let email = normalize_email(email);
    match api.verify(&email, code.trim()).await {
        Ok(_) => Notice::Success("Verified. You can login now.".to_string()),
        Err(err) => Notice::Failure(err.user_message("Verification failed.")),
    }
}

/// Clears the stored session even when the server cannot be reached.
pub async fn logout(api: &ApiClient, store: &SessionStore) -> Result<Notice> {
    if let Err(err) = api.logout().await {
        tracing::warn!("Server logout failed: {}", err);
    }
    store.clear()?;
    tracing::info!("Cleared stored session");
    Ok(Notice::Success("Logged out.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{respond, FakeBackend};
    use axum::{http::StatusCode, Router};
    use serde_json::json;
    use shared::Role;

    fn temp_store() -> SessionStore {
        SessionStore::at(std::env::temp_dir().join(format!("campusbook-auth-{}.toml", uuid::Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_login_stores_admin_session() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/auth/login",
            respond(
                StatusCode::OK,
                json!({"message": "Login successful", "email": "demo.admin@uni-bayreuth.de", "role": "admin"}),
            ),
        ))
        .await;
        let store = temp_store();

        let outcome = login(&backend.client(), &store, " Demo.Admin@uni-bayreuth.de ", "secret")
            .await
            .unwrap();
        assert!(outcome.text().contains("admin requests"));
        assert_eq!(store.load().role(), &Role::Admin);
        assert_eq!(backend.last_body().unwrap()["email"], "demo.admin@uni-bayreuth.de");
        store.clear().unwrap();
    }

    #[tokio::test]
    async fn test_failed_login_keeps_guest() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/auth/login",
            respond(StatusCode::UNAUTHORIZED, json!({"error": "Invalid email or password"})),
        ))
        .await;
        let store = temp_store();

        let outcome = login(&backend.client(), &store, "a@uni-bayreuth.de", "nope").await.unwrap();
        assert_eq!(outcome, Notice::Failure("Invalid email or password".to_string()));
        assert_eq!(store.load(), Session::guest());
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_server_fails() {
        let backend = FakeBackend::start(Router::new()).await;
        let store = temp_store();
        store.save(&Session::new("a@uni-bayreuth.de", "student")).unwrap();

        let outcome = logout(&backend.client(), &store).await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(store.load(), Session::guest());
    }

    #[tokio::test]
    async fn test_register_rejects_blank_email_locally() {
        let backend = FakeBackend::start(Router::new()).await;
        let outcome = register(&backend.client(), "  ", "secret1").await;
        assert_eq!(outcome, Notice::Failure("Enter an email.".to_string()));
        assert!(backend.calls().is_empty());
    }
}
