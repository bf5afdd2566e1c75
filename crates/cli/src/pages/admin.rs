use chrono::{DateTime, Utc};
use shared::{
    ordering::event_cards, AdminRequestCard, Decision, EventCard, EventRoster, RequestStatus,
    RoomCard, RoomRoster, Session, ValidationError,
};

use super::{notice, require_admin};
use crate::api::{ApiClient, ApiResult};
use crate::error::ClientError;
use crate::render::Notice;

pub const LOAD_FALLBACK: &str = "Failed to load requests.";
const DECISION_FALLBACK: &str = "Failed.";

pub async fn requests(
    api: &ApiClient,
    session: &Session,
    status: RequestStatus,
) -> ApiResult<Vec<AdminRequestCard>> {
    let admin_email = require_admin(session)?;
    let requests = api.admin_requests(admin_email, status).await?;
    Ok(requests.into_iter().map(AdminRequestCard::new).collect())
}

pub async fn accept(api: &ApiClient, session: &Session, request_id: i64) -> Notice {
    decide(api, session, request_id, Ok(Decision::Accept)).await
}

/// A blank comment is refused before anything is sent.
pub async fn reject(api: &ApiClient, session: &Session, request_id: i64, comment: &str) -> Notice {
    decide(api, session, request_id, Decision::reject(comment)).await
}

async fn decide(
    api: &ApiClient,
    session: &Session,
    request_id: i64,
    decision: Result<Decision, ValidationError>,
) -> Notice {
    let admin_email = match require_admin(session) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.user_message(DECISION_FALLBACK)),
    };
    let decision = match decision {
        Ok(decision) => decision,
        Err(err) => return Notice::Failure(err.to_string()),
    };

    // Only requests still pending may be decided; a decision is final.
    // Without the pending list the server has the last word.
    match api.admin_requests(admin_email, RequestStatus::Pending).await {
        Ok(pending) if !pending.iter().any(|r| r.id == request_id) => {
            return Notice::Failure(ValidationError::NotPending.to_string());
        }
        Ok(_) => {}
        Err(err) => tracing::warn!("Could not check request {} before deciding: {}", request_id, err),
    }

    let success = match decision.outcome() {
        RequestStatus::Accepted => "Accepted.",
        _ => "Rejected.",
    };
    notice(
        api.admin_decision(admin_email, request_id, decision.action(), decision.comment())
            .await,
        success,
        DECISION_FALLBACK,
    )
}

/// All rooms in server order with flags attached.
pub async fn rooms(api: &ApiClient, session: &Session) -> ApiResult<Vec<RoomCard>> {
    let admin_email = require_admin(session)?;
    let rooms = api.admin_rooms(admin_email).await?;
    Ok(rooms.into_iter().map(RoomCard::new).collect())
}

pub async fn room_students(api: &ApiClient, session: &Session, room_id: i64) -> ApiResult<RoomRoster> {
    let admin_email = require_admin(session)?;
    api.admin_room_students(admin_email, room_id).await
}

/// All events in server order with flags attached.
pub async fn events(
    api: &ApiClient,
    session: &Session,
    now: DateTime<Utc>,
) -> ApiResult<Vec<EventCard>> {
    let admin_email = require_admin(session)?;
    let events = api.admin_events(admin_email).await?;
    Ok(event_cards(events, session, now))
}

pub async fn event_students(
    api: &ApiClient,
    session: &Session,
    event_id: i64,
) -> ApiResult<EventRoster> {
    let admin_email = require_admin(session)?;
    api.admin_event_students(admin_email, event_id).await
}

pub async fn rooms_open(api: &ApiClient, session: &Session) -> ApiResult<bool> {
    require_admin(session)?;
    Ok(api.rooms_open().await?.open)
}

pub async fn set_rooms_open(api: &ApiClient, session: &Session, open: bool) -> Notice {
    let result: Result<bool, ClientError> = async {
        let admin_email = require_admin(session)?;
        Ok(api.admin_set_rooms_open(admin_email, open).await?.open)
    }
    .await;

    match result {
        Ok(true) => Notice::Success("Room selection is now OPEN.".to_string()),
        Ok(false) => Notice::Success("Room selection is now CLOSED.".to_string()),
        Err(err) => Notice::Failure(err.user_message("Failed to update room selection.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{respond, FakeBackend};
    use axum::{http::StatusCode, Router};
    use serde_json::json;
    use shared::AdminControls;

    fn admin() -> Session {
        Session::new("demo.admin@uni-bayreuth.de", "admin")
    }

    fn request_json(id: i64, status: &str) -> serde_json::Value {
        json!({
            "id": id, "title": "Open mic", "category": "social", "date_time": "2030-01-01T20:00",
            "location": "Aula", "description": "", "quota": 40,
            "requested_by_email": "a@uni-bayreuth.de", "status": status,
            "admin_comment": null, "created_at": "2026-10-01", "updated_at": "2026-10-02"
        })
    }

    fn decision_backend() -> Router {
        Router::new()
            .route(
                "/api/admin/event-requests",
                respond(StatusCode::OK, json!([request_json(11, "pending")])),
            )
            .route(
                "/api/admin/event-requests/11/decision",
                respond(StatusCode::OK, json!({"message": "Rejected"})),
            )
    }

    #[tokio::test]
    async fn test_blank_reject_comment_never_reaches_server() {
        let backend = FakeBackend::start(decision_backend()).await;

        for comment in ["", "   ", "\n"] {
            let outcome = reject(&backend.client(), &admin(), 11, comment).await;
            assert_eq!(outcome, Notice::Failure("Rejection comment is required.".to_string()));
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reject_with_comment() {
        let backend = FakeBackend::start(decision_backend()).await;

        let outcome = reject(&backend.client(), &admin(), 11, " Venue unavailable ").await;
        assert_eq!(outcome, Notice::Success("Rejected.".to_string()));
        assert_eq!(
            backend.last_body(),
            Some(json!({
                "admin_email": "demo.admin@uni-bayreuth.de",
                "action": "reject",
                "comment": "Venue unavailable"
            }))
        );
    }

    #[tokio::test]
    async fn test_decided_request_cannot_be_decided_again() {
        let backend = FakeBackend::start(decision_backend()).await;

        let outcome = accept(&backend.client(), &admin(), 12).await;
        assert_eq!(outcome, Notice::Failure("Only pending requests can be decided.".to_string()));
        assert!(!backend.calls().iter().any(|c| c.contains("/decision")));
    }

    #[tokio::test]
    async fn test_decision_is_sent_when_pending_list_is_unavailable() {
        let backend = FakeBackend::start(
            Router::new()
                .route(
                    "/api/admin/event-requests",
                    respond(StatusCode::SERVICE_UNAVAILABLE, json!({"error": "Try again later"})),
                )
                .route(
                    "/api/admin/event-requests/11/decision",
                    respond(StatusCode::OK, json!({"message": "Accepted and published"})),
                ),
        )
        .await;

        let outcome = accept(&backend.client(), &admin(), 11).await;
        assert_eq!(outcome, Notice::Success("Accepted.".to_string()));
        assert_eq!(
            backend.calls().last().map(String::as_str),
            Some("POST /api/admin/event-requests/11/decision")
        );
        assert_eq!(backend.last_body().unwrap()["action"], "accept");
    }

    #[tokio::test]
    async fn test_non_admin_is_stopped_locally() {
        let backend = FakeBackend::start(decision_backend()).await;
        let student = Session::new("a@uni-bayreuth.de", "student");

        let err = requests(&backend.client(), &student, RequestStatus::Pending)
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(LOAD_FALLBACK),
            "Admin access required. Login with admin account."
        );
        let outcome = accept(&backend.client(), &student, 11).await;
        assert!(!outcome.is_success());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_requests_by_status() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/admin/event-requests",
            respond(StatusCode::OK, json!([request_json(3, "accepted")])),
        ))
        .await;

        let cards = requests(&backend.client(), &admin(), RequestStatus::Accepted)
            .await
            .unwrap();
        assert_eq!(cards[0].controls, AdminControls::Published);
        assert_eq!(cards[0].quota_text, "40");
        assert_eq!(
            backend.calls(),
            vec!["GET /api/admin/event-requests?admin_email=demo.admin%40uni-bayreuth.de&status=accepted".to_string()]
        );
    }

    #[tokio::test]
    async fn test_toggle_rooms_open() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/admin/settings/rooms_open",
            respond(StatusCode::OK, json!({"message": "Updated", "open": false})),
        ))
        .await;

        let outcome = set_rooms_open(&backend.client(), &admin(), false).await;
        assert_eq!(outcome, Notice::Success("Room selection is now CLOSED.".to_string()));
        assert_eq!(backend.last_body().unwrap()["open"], false);
    }

    #[tokio::test]
    async fn test_room_roster() {
        let backend = FakeBackend::start(Router::new().route(
            "/api/admin/rooms/2/students",
            respond(
                StatusCode::OK,
                json!({"room_id": 2, "room_title": "Room B", "students": [{"email": "a@uni-bayreuth.de", "joined_at": "2026-10-01"}]}),
            ),
        ))
        .await;

        let roster = room_students(&backend.client(), &admin(), 2).await.unwrap();
        assert_eq!(roster.students.len(), 1);
        assert_eq!(roster.room_title, "Room B");
    }
}
