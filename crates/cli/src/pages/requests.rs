use shared::{OwnerRequestCard, RequestForm, Session, ValidationError};

use super::{notice, require_email};
use crate::api::{ApiClient, ApiResult};
use crate::render::Notice;

pub const LOAD_FALLBACK: &str = "Failed to load your requests.";

pub async fn mine(api: &ApiClient, session: &Session) -> ApiResult<Vec<OwnerRequestCard>> {
    let email = require_email(session)?;
    let requests = api.my_requests(email).await?;
    Ok(requests.into_iter().map(OwnerRequestCard::new).collect())
}

/// Validates the form locally; nothing is sent when a field is missing.
pub async fn create(api: &ApiClient, session: &Session, form: &RequestForm) -> Notice {
    let request = match form.validate(session.email()) {
        Ok(request) => request,
        Err(err) => return Notice::Failure(err.to_string()),
    };
    notice(
        api.create_request(&request).await,
        "Request submitted (pending).",
        "Failed to submit request.",
    )
}

/// Hides a decided request from the owner's own list. A request still
/// pending in the owner's list is refused without calling the hide endpoint.
pub async fn hide(api: &ApiClient, session: &Session, request_id: i64) -> Notice {
    let email = match require_email(session) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.user_message("Failed to hide.")),
    };

    match api.my_requests(email).await {
        Ok(requests) => {
            let pending = requests
                .iter()
                .any(|r| r.id == request_id && !r.status.is_terminal());
            if pending {
                return Notice::Failure(ValidationError::PendingNotHideable.to_string());
            }
        }
        Err(err) => tracing::warn!("Could not check request {} before hiding: {}", request_id, err),
    }

    notice(
        api.hide_request(request_id, email).await,
        "Hidden.",
        "Failed to hide.",
    )
}
