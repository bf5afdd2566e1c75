//! Availability flags and quota text for rooms and events.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{Event, Room};
use crate::session::Session;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub is_full: bool,
    /// `None` for records without a date (rooms).
    pub is_past: Option<bool>,
    pub remaining_text: String,
}

pub fn classify_room(room: &Room) -> Availability {
    Availability {
        is_full: room.remaining <= 0,
        is_past: None,
        remaining_text: format!(
            "{}/{} booked (remaining: {})",
            room.booked_count, room.capacity, room.remaining
        ),
    }
}

pub fn classify_event(event: &Event, now: DateTime<Utc>) -> Availability {
    let (is_full, remaining_text) = match (event.quota, event.remaining_seats()) {
        (Some(quota), Some(remaining)) => (
            remaining <= 0,
            format!(
                "{}/{} registered (remaining: {})",
                event.registered_count, quota, remaining
            ),
        ),
        _ => (
            false,
            format!("{} registered (unlimited)", event.registered_count),
        ),
    };

    Availability {
        is_full,
        is_past: Some(is_past(&event.date_time, now)),
        remaining_text,
    }
}

/// Strictly before `now`. Unparseable timestamps are never past.
pub fn is_past(date_time: &str, now: DateTime<Utc>) -> bool {
    parse_timestamp(date_time).is_some_and(|at| at < now)
}

/// Accepts RFC 3339 plus the naive forms the backend stores. Naive
/// date-times are local wall-clock time; a bare date is midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_in(value, &Local)
}

/// Like [`parse_timestamp`], reading naive date-times as wall-clock time in `tz`.
pub fn parse_timestamp_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        // A wall-clock time skipped by a DST jump lands an hour later.
        return tz
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
            .map(|at| at.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// A room ready for display, with its join control state.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCard {
    pub room: Room,
    pub availability: Availability,
}

impl RoomCard {
    pub fn new(room: Room) -> Self {
        let availability = classify_room(&room);
        Self { room, availability }
    }

    pub fn is_full(&self) -> bool {
        self.availability.is_full
    }

    pub fn can_join(&self) -> bool {
        !self.is_full()
    }

    pub fn join_label(&self) -> &'static str {
        if self.can_join() {
            "Join room"
        } else {
            "Full"
        }
    }
}

/// An event ready for display, with its register control state.
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub event: Event,
    pub availability: Availability,
    pub can_register: bool,
}

impl EventCard {
    pub fn new(event: Event, session: &Session, now: DateTime<Utc>) -> Self {
        let availability = classify_event(&event, now);
        let can_register = !availability.is_full
            && !availability.is_past.unwrap_or(false)
            && session.is_logged_in();
        Self {
            event,
            availability,
            can_register,
        }
    }

    pub fn is_full(&self) -> bool {
        self.availability.is_full
    }

    pub fn is_past(&self) -> bool {
        self.availability.is_past.unwrap_or(false)
    }

    pub fn register_label(&self) -> &'static str {
        if self.can_register {
            "Register"
        } else {
            "Register unavailable"
        }
    }
}
