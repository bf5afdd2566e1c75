use chrono::{DateTime, Utc};
use shared::{
    ordering::{event_cards, event_catalog},
    EventCard, Pager, PagerControls, Session,
};

use super::{notice, require_email};
use crate::api::{ApiClient, ApiResult};
use crate::render::Notice;

pub const LOAD_FALLBACK: &str = "Failed to load events.";
pub const MINE_FALLBACK: &str = "Failed to load your registered events.";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub cards: Vec<EventCard>,
    pub controls: PagerControls,
}

/// The paged events catalog. Owns the current page; every move is
/// followed by a fresh load, nothing is cached between pages.
pub struct EventsBrowser {
    pager: Pager,
}

impl EventsBrowser {
    pub fn new(pager: Pager) -> Self {
        Self { pager }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub async fn load(
        &self,
        api: &ApiClient,
        session: &Session,
        now: DateTime<Utc>,
    ) -> ApiResult<CatalogView> {
        let envelope = api
            .events(self.pager.page(), self.pager.page_size())
            .await?;
        let controls = self.pager.controls(&envelope);
        Ok(CatalogView {
            cards: event_catalog(envelope.items, session, now),
            controls,
        })
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn prev(&mut self) {
        self.pager.prev();
    }
}

/// The user's own registrations, in server order.
pub async fn registered(
    api: &ApiClient,
    session: &Session,
    now: DateTime<Utc>,
) -> ApiResult<Vec<EventCard>> {
    let email = require_email(session)?;
    let events = api.my_events(email).await?;
    Ok(event_cards(events, session, now))
}

pub async fn register(api: &ApiClient, session: &Session, event_id: i64) -> Notice {
    let email = match require_email(session) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.user_message("Failed to register.")),
    };
    notice(
        api.register_event(event_id, email).await,
        "Registered.",
        "Failed to register.",
    )
}

pub async fn leave(api: &ApiClient, session: &Session, event_id: i64) -> Notice {
    let email = match require_email(session) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.user_message("Failed to leave.")),
    };
    notice(
        api.leave_event(event_id, email).await,
        "Left.",
        "Failed to leave.",
    )
}
