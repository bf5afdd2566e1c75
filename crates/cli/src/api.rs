//! REST client for the booking backend.
//!
//! Identity travels explicitly as `email` / `admin_email` on every call.
//! Any non-2xx status is a failure; the body's `error` string is kept for
//! display. No retries.

use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    Credentials, DecisionBody, EmailBody, Event, EventRequest, EventRoster, InfoPage, LoginReply,
    MessageReply, MyRoom, NewEventRequest, Page, RequestStatus, Room, RoomRoster, RoomsOpen,
    RoomsOpenBody, VerificationStatus, VerifyCode,
};

use crate::error::ClientError;

pub type ApiResult<T> = Result<T, ClientError>;

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment.
    fn segment_url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        tracing::debug!("GET {}", path);
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        tracing::debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // A body that is not JSON counts as "no data".
        let data: Option<Value> = serde_json::from_str(&body).ok();

        if !status.is_success() {
            let message = data
                .as_ref()
                .and_then(|data| data.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string);
            tracing::warn!("Request failed with {}: {:?}", status, message);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let data = data.ok_or_else(|| ClientError::Decode("response is not JSON".to_string()))?;
        serde_json::from_value(data).map_err(|e| ClientError::Decode(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginReply> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &body).await
    }

    pub async fn register(&self, email: &str, password: &str) -> ApiResult<MessageReply> {
        let body = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/register", &body).await
    }

    pub async fn verify(&self, email: &str, code: &str) -> ApiResult<MessageReply> {
        let body = VerifyCode {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.post("/api/auth/verify", &body).await
    }

    pub async fn logout(&self) -> ApiResult<MessageReply> {
        tracing::debug!("POST /api/auth/logout");
        self.send(self.client.post(self.url("/api/auth/logout"))).await
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    pub async fn rooms(&self) -> ApiResult<Vec<Room>> {
        self.get("/api/rooms", &[]).await
    }

    pub async fn my_room(&self, email: &str) -> ApiResult<MyRoom> {
        self.get("/api/me/room", &[("email", email)]).await
    }

    pub async fn rooms_open(&self) -> ApiResult<RoomsOpen> {
        self.get("/api/settings/rooms_open", &[]).await
    }

    pub async fn join_room(&self, room_id: i64, email: &str) -> ApiResult<MessageReply> {
        self.post(&format!("/api/rooms/{room_id}/join"), &email_body(email))
            .await
    }

    pub async fn leave_room(&self, email: &str) -> ApiResult<MessageReply> {
        self.post("/api/rooms/leave", &email_body(email)).await
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub async fn events(&self, page: u32, page_size: u32) -> ApiResult<Page<Event>> {
        let page = page.to_string();
        let page_size = page_size.to_string();
        self.get(
            "/api/events",
            &[("page", page.as_str()), ("page_size", page_size.as_str())],
        )
        .await
    }

    pub async fn register_event(&self, event_id: i64, email: &str) -> ApiResult<MessageReply> {
        self.post(&format!("/api/events/{event_id}/register"), &email_body(email))
            .await
    }

    pub async fn leave_event(&self, event_id: i64, email: &str) -> ApiResult<MessageReply> {
        self.post(&format!("/api/events/{event_id}/leave"), &email_body(email))
            .await
    }

    pub async fn my_events(&self, email: &str) -> ApiResult<Vec<Event>> {
        self.get("/api/me/events", &[("email", email)]).await
    }

    // ------------------------------------------------------------------
    // Event requests
    // ------------------------------------------------------------------

    pub async fn my_requests(&self, email: &str) -> ApiResult<Vec<EventRequest>> {
        self.get("/api/event-requests", &[("email", email)]).await
    }

    pub async fn create_request(&self, request: &NewEventRequest) -> ApiResult<MessageReply> {
        self.post("/api/event-requests", request).await
    }

    pub async fn hide_request(&self, request_id: i64, email: &str) -> ApiResult<MessageReply> {
        self.post(&format!("/api/event-requests/{request_id}/hide"), &email_body(email))
            .await
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    pub async fn admin_requests(
        &self,
        admin_email: &str,
        status: RequestStatus,
    ) -> ApiResult<Vec<EventRequest>> {
        self.get(
            "/api/admin/event-requests",
            &[("admin_email", admin_email), ("status", status.as_str())],
        )
        .await
    }

    pub async fn admin_decision(
        &self,
        admin_email: &str,
        request_id: i64,
        action: &str,
        comment: &str,
    ) -> ApiResult<MessageReply> {
        let body = DecisionBody {
            admin_email: admin_email.to_string(),
            action: action.to_string(),
            comment: comment.to_string(),
        };
        self.post(&format!("/api/admin/event-requests/{request_id}/decision"), &body)
            .await
    }

    pub async fn admin_rooms(&self, admin_email: &str) -> ApiResult<Vec<Room>> {
        self.get("/api/admin/rooms", &[("admin_email", admin_email)])
            .await
    }

    pub async fn admin_room_students(&self, admin_email: &str, room_id: i64) -> ApiResult<RoomRoster> {
        self.get(
            &format!("/api/admin/rooms/{room_id}/students"),
            &[("admin_email", admin_email)],
        )
        .await
    }

    pub async fn admin_events(&self, admin_email: &str) -> ApiResult<Vec<Event>> {
        self.get("/api/admin/events", &[("admin_email", admin_email)])
            .await
    }

    pub async fn admin_event_students(
        &self,
        admin_email: &str,
        event_id: i64,
    ) -> ApiResult<EventRoster> {
        self.get(
            &format!("/api/admin/events/{event_id}/students"),
            &[("admin_email", admin_email)],
        )
        .await
    }

    pub async fn admin_set_rooms_open(&self, admin_email: &str, open: bool) -> ApiResult<RoomsOpen> {
        let body = RoomsOpenBody {
            admin_email: admin_email.to_string(),
            open,
        };
        self.post("/api/admin/settings/rooms_open", &body).await
    }

    // ------------------------------------------------------------------
    // Info and demo inbox
    // ------------------------------------------------------------------

    pub async fn info_all(&self) -> ApiResult<Vec<InfoPage>> {
        self.get("/api/info", &[]).await
    }

    pub async fn info(&self, slug: &str) -> ApiResult<InfoPage> {
        let url = self.segment_url(&["api", "info", slug])?;
        tracing::debug!("GET {}", url.path());
        self.send(self.client.get(url)).await
    }

    pub async fn demo_verification_status(&self, email: &str) -> ApiResult<VerificationStatus> {
        self.get("/api/demo/verification-status", &[("email", email)])
            .await
    }

    pub async fn demo_verify(&self, email: &str) -> ApiResult<MessageReply> {
        self.post("/api/demo/verify", &email_body(email)).await
    }
}

fn email_body(email: &str) -> EmailBody {
    EmailBody {
        email: email.to_string(),
    }
}
