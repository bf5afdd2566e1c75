use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Records received from the backend
// ============================================================================

/// A bookable room as listed by `/api/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub price_eur: i64,
    pub capacity: i64,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub booked_count: i64,
    pub remaining: i64,
    #[serde(default)]
    pub description: String,
}

/// A published event. `quota == None` means unlimited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub date_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quota: Option<i64>,
    #[serde(default)]
    pub registered_count: i64,
    #[serde(default)]
    pub remaining: Option<i64>,
}

impl Event {
    /// Seats left, only meaningful when the event has a quota.
    pub fn remaining_seats(&self) -> Option<i64> {
        self.quota
            .map(|quota| self.remaining.unwrap_or(quota - self.registered_count))
    }
}

/// Status of a user-submitted event proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [Self::Pending, Self::Accepted, Self::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Only an administrator decision moves a request, and only out of pending.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposal for a new event, pending an administrator decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub date_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quota: Option<i64>,
    pub status: RequestStatus,
    #[serde(default)]
    pub admin_comment: Option<String>,
    /// Only present in the administrator listing.
    #[serde(default)]
    pub requested_by_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: String,
}

/// Pagination envelope returned by `/api/events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoPage {
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyRoom {
    #[serde(default)]
    pub room: Option<Room>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomsOpen {
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResident {
    pub email: String,
    #[serde(default)]
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRoster {
    pub room_id: i64,
    #[serde(default)]
    pub room_title: String,
    #[serde(default)]
    pub students: Vec<RoomResident>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
    #[serde(default)]
    pub registered_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRoster {
    pub event_id: i64,
    #[serde(default)]
    pub event_title: String,
    #[serde(default)]
    pub students: Vec<EventAttendee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageReply {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationStatus {
    pub email: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub last_sent_at: String,
}

// ============================================================================
// Payloads sent to the backend
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCode {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailBody {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEventRequest {
    pub email: String,
    pub title: String,
    pub category: String,
    pub date_time: String,
    pub location: String,
    pub description: String,
    pub quota: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionBody {
    pub admin_email: String,
    pub action: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomsOpenBody {
    pub admin_email: String,
    pub open: bool,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_deserialization_renames_type() {
        let json = r#"{"id":3,"type":"single","title":"Room A","description":"Quiet","price_eur":320,"capacity":1,"available":true,"booked_count":1,"remaining":0,"is_full":true}"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.kind, "single");
        assert_eq!(room.remaining, 0);
        assert_eq!(room.price_eur, 320);
    }

    #[test]
    fn test_event_with_null_quota() {
        let json = r#"{"id":1,"title":"Welcome party","category":"social","date_time":"2030-10-01T18:00","location":"Mensa","description":"","quota":null,"registered_count":12,"remaining":null,"is_full":false}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.quota, None);
        assert_eq!(event.remaining_seats(), None);
    }

    #[test]
    fn test_event_remaining_falls_back_to_quota_minus_registered() {
        let json = r#"{"id":2,"title":"Study group","date_time":"2030-10-01","quota":10,"registered_count":7}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.remaining_seats(), Some(3));
    }

    #[test]
    fn test_request_status_wire_format() {
        let json = serde_json::to_string(&RequestStatus::Accepted).unwrap();
        assert_eq!(json, "\"accepted\"");

        let status: RequestStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, RequestStatus::Rejected);
        assert_eq!(RequestStatus::parse(" Pending "), Some(RequestStatus::Pending));
        assert_eq!(RequestStatus::parse("archived"), None);
    }

    #[test]
    fn test_request_status_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Accepted));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Accepted.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Accepted));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_event_page_envelope() {
        let json = r#"{"items":[],"page":1,"page_size":4,"has_prev":false,"has_next":true,"total":9}"#;
        let page: Page<Event> = serde_json::from_str(json).unwrap();
        assert!(page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.total, Some(9));
    }

    #[test]
    fn test_owner_request_without_requester_field() {
        let json = r#"{"id":5,"title":"Board games","category":"social","date_time":"2030-01-01T19:00","location":"Hall","description":"Bring games","quota":null,"status":"rejected","admin_comment":"Room taken","created_at":"x","updated_at":"y"}"#;
        let request: EventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, RequestStatus::Rejected);
        assert_eq!(request.admin_comment.as_deref(), Some("Room taken"));
        assert_eq!(request.requested_by_email, None);
    }

    #[test]
    fn test_new_event_request_serializes_null_quota() {
        let body = NewEventRequest {
            email: "a@uni-bayreuth.de".to_string(),
            title: "t".to_string(),
            category: "social".to_string(),
            date_time: "2030-01-01T10:00".to_string(),
            location: "l".to_string(),
            description: "d".to_string(),
            quota: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"quota\":null"));
    }
}
