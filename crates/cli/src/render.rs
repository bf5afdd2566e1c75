//! Text rendering of page views.

use shared::{
    AdminControls, AdminRequestCard, EventCard, EventRoster, InfoPage, OwnerRequestCard,
    PagerControls, Room, RoomCard, RoomRoster,
};

/// Result of a single user action, shown next to the control that fired it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn print(&self) {
        match self {
            Notice::Success(text) => println!("\x1b[32m✓ {}\x1b[0m", text),
            Notice::Failure(text) => println!("\x1b[31m✗ {}\x1b[0m", text),
        }
    }
}

pub fn placeholder(text: &str) {
    println!("\x1b[90m{}\x1b[0m", text);
}

fn tags(is_full: bool, is_past: bool) -> String {
    let mut tags = String::new();
    if is_full {
        tags.push_str(" [full]");
    }
    if is_past {
        tags.push_str(" [past]");
    }
    tags
}

pub fn room_card(card: &RoomCard) -> String {
    let room = &card.room;
    let control = if card.can_join() {
        format!("{} → campusbook rooms join {}", card.join_label(), room.id)
    } else {
        card.join_label().to_string()
    };
    format!(
        "#{} {}{}\n  Type: {}\n  Price: €{}\n  Quota: {}\n  {}\n  [{}]",
        room.id,
        room.title,
        tags(card.is_full(), false),
        room.kind,
        room.price_eur,
        card.availability.remaining_text,
        room.description,
        control,
    )
}

pub fn my_room(room: &Room) -> String {
    format!(
        "Your room: {}\n  Type: {}\n  Price: €{}\n  Capacity: {}",
        room.title, room.kind, room.price_eur, room.capacity
    )
}

pub fn event_card(card: &EventCard) -> String {
    let event = &card.event;
    let control = if card.can_register {
        format!("{} → campusbook events register {}", card.register_label(), event.id)
    } else {
        card.register_label().to_string()
    };
    format!(
        "#{} {}{}\n  Category: {}\n  Date/Time: {}\n  Location: {}\n  Quota: {}\n  {}\n  [{}]",
        event.id,
        event.title,
        tags(card.is_full(), card.is_past()),
        event.category,
        event.date_time,
        event.location,
        card.availability.remaining_text,
        event.description,
        control,
    )
}

pub fn registered_event(card: &EventCard) -> String {
    let event = &card.event;
    format!(
        "#{} {}{}\n  Date/Time: {}\n  Location: {}\n  Quota: {}\n  [Leave event → campusbook events leave {}]",
        event.id,
        event.title,
        tags(card.is_full(), card.is_past()),
        event.date_time,
        event.location,
        card.availability.remaining_text,
        event.id,
    )
}

pub fn pager(controls: &PagerControls) -> String {
    let prev = if controls.prev_enabled { "‹ prev" } else { "      " };
    let next = if controls.next_enabled { "next ›" } else { "" };
    format!("{}  {}  {}", prev, controls.label, next).trim_end().to_string()
}

pub fn owner_request(card: &OwnerRequestCard) -> String {
    let request = &card.request;
    let hide = match card.hide_hint {
        Some(hint) => hint.to_string(),
        None => format!("✕ hide → campusbook requests hide {}", request.id),
    };
    let mut out = format!(
        "#{} {}  [{}]\n  Status: {}\n  Last modified: {}\n  Date/Time: {}\n  Location: {}\n  Category: {}\n  {}",
        request.id,
        request.title,
        hide,
        request.status,
        request.updated_at,
        request.date_time,
        request.location,
        request.category,
        request.description,
    );
    if let Some(comment) = &card.comment {
        out.push_str(&format!("\n  Admin comment: {}", comment));
    }
    out
}

pub fn admin_request(card: &AdminRequestCard) -> String {
    let request = &card.request;
    let mut out = format!(
        "#{} {}\n  Status: {}\n  Last modified: {}\n  Requested by: {}\n  Date/Time: {}\n  Location: {}\n  Category: {}\n  Quota: {}\n  {}",
        request.id,
        request.title,
        request.status,
        request.updated_at,
        request.requested_by_email.as_deref().unwrap_or(""),
        request.date_time,
        request.location,
        request.category,
        card.quota_text,
        request.description,
    );
    match &card.controls {
        AdminControls::Decide => out.push_str(&format!(
            "\n  [Accept → campusbook admin accept {id}]\n  [Reject → campusbook admin reject {id} --comment \"reason (required)\"]",
            id = request.id
        )),
        other => {
            if let Some(note) = other.note() {
                out.push_str(&format!("\n  {}", note));
            }
        }
    }
    out
}

pub fn room_roster(roster: &RoomRoster) -> String {
    let mut out = format!("Room #{} {}", roster.room_id, roster.room_title);
    if roster.students.is_empty() {
        out.push_str("\n  No students in this room.");
    }
    for student in &roster.students {
        out.push_str(&format!("\n  {}  (joined {})", student.email, student.joined_at));
    }
    out
}

pub fn event_roster(roster: &EventRoster) -> String {
    let mut out = format!("Event #{} {}", roster.event_id, roster.event_title);
    if roster.students.is_empty() {
        out.push_str("\n  No registrations yet.");
    }
    for student in &roster.students {
        out.push_str(&format!("\n  {}  (registered {})", student.email, student.registered_at));
    }
    out
}

pub fn info_page(page: &InfoPage) -> String {
    format!("\x1b[1m{}\x1b[0m\n{}", page.title, page.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::{Event, EventRequest, RequestStatus, Session};

    fn request(status: RequestStatus) -> EventRequest {
        EventRequest {
            id: 4,
            title: "Pub quiz".to_string(),
            category: "social".to_string(),
            date_time: "2030-01-01T19:00".to_string(),
            location: "Bar".to_string(),
            description: "Teams of four".to_string(),
            quota: None,
            status,
            admin_comment: Some("Too late in the semester".to_string()),
            requested_by_email: Some("a@uni-bayreuth.de".to_string()),
            created_at: None,
            updated_at: "2026-10-01".to_string(),
        }
    }

    #[test]
    fn test_pending_request_has_no_hide_control() {
        let text = owner_request(&OwnerRequestCard::new(request(RequestStatus::Pending)));
        assert!(text.contains("Pending (cannot remove)"));
        assert!(!text.contains("requests hide"));
        assert!(!text.contains("Admin comment"));
    }

    #[test]
    fn test_terminal_requests_have_hide_control() {
        for status in [RequestStatus::Accepted, RequestStatus::Rejected] {
            let text = owner_request(&OwnerRequestCard::new(request(status)));
            assert!(text.contains("campusbook requests hide 4"));
        }
        let text = owner_request(&OwnerRequestCard::new(request(RequestStatus::Rejected)));
        assert!(text.contains("Admin comment: Too late in the semester"));
    }

    #[test]
    fn test_admin_controls_rendering() {
        let text = admin_request(&AdminRequestCard::new(request(RequestStatus::Pending)));
        assert!(text.contains("admin accept 4"));
        assert!(text.contains("Quota: unlimited"));

        let text = admin_request(&AdminRequestCard::new(request(RequestStatus::Accepted)));
        assert!(text.contains("Accepted and published."));
        assert!(!text.contains("admin accept"));
    }

    #[test]
    fn test_full_event_card() {
        let event = Event {
            id: 9,
            title: "Campus tour".to_string(),
            category: "orientation".to_string(),
            date_time: "2030-01-01T10:00".to_string(),
            location: "Main gate".to_string(),
            description: String::new(),
            quota: Some(10),
            registered_count: 10,
            remaining: Some(0),
        };
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let card = EventCard::new(event, &Session::new("a@uni-bayreuth.de", "student"), now);
        let text = event_card(&card);
        assert!(text.contains("10/10 registered (remaining: 0)"));
        assert!(text.contains("[Register unavailable]"));
        assert!(text.contains("[full]"));
    }

    #[test]
    fn test_pager_line() {
        let controls = PagerControls {
            prev_enabled: false,
            next_enabled: true,
            label: "Page 1".to_string(),
        };
        assert_eq!(pager(&controls), "        Page 1  next ›");
    }
}
