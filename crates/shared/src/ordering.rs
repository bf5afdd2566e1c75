//! Display order for lists fetched from the backend.
//!
//! Open and upcoming items come first; ids break ties so the same server
//! data always renders in the same order.

use chrono::{DateTime, Utc};

use crate::availability::{EventCard, RoomCard};
use crate::models::{Event, Room};
use crate::session::Session;

/// Rooms by `(is_full, id)`.
pub fn sort_room_cards(cards: &mut [RoomCard]) {
    cards.sort_by_key(|card| (card.is_full(), card.room.id));
}

/// Events by `(is_past, is_full, id)`.
pub fn sort_event_cards(cards: &mut [EventCard]) {
    cards.sort_by_key(|card| (card.is_past(), card.is_full(), card.event.id));
}

pub fn room_catalog(rooms: Vec<Room>) -> Vec<RoomCard> {
    let mut cards: Vec<RoomCard> = rooms.into_iter().map(RoomCard::new).collect();
    sort_room_cards(&mut cards);
    cards
}

pub fn event_catalog(events: Vec<Event>, session: &Session, now: DateTime<Utc>) -> Vec<EventCard> {
    let mut cards = event_cards(events, session, now);
    sort_event_cards(&mut cards);
    cards
}

/// Flags attached, server order kept. Used for the user's own registrations.
pub fn event_cards(events: Vec<Event>, session: &Session, now: DateTime<Utc>) -> Vec<EventCard> {
    events
        .into_iter()
        .map(|event| EventCard::new(event, session, now))
        .collect()
}
