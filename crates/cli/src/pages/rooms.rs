use shared::{ordering::room_catalog, Room, RoomCard, Session};

use super::{notice, require_email};
use crate::api::{ApiClient, ApiResult};
use crate::render::Notice;

pub const LOAD_FALLBACK: &str = "Failed to load rooms.";

#[derive(Debug, Clone, PartialEq)]
pub struct RoomsView {
    /// Empty when the lock state could not be read.
    pub lock_message: String,
    pub my_room: Option<Room>,
    pub cards: Vec<RoomCard>,
}

pub async fn load(api: &ApiClient, session: &Session) -> ApiResult<RoomsView> {
    let email = require_email(session)?;

    let lock_message = match api.rooms_open().await {
        Ok(state) if state.open => "Room selection is currently OPEN.".to_string(),
        Ok(_) => "Room selection is currently CLOSED by admin.".to_string(),
        Err(err) => {
            tracing::warn!("Could not read room lock state: {}", err);
            String::new()
        }
    };

    let my_room = match api.my_room(email).await {
        Ok(mine) => mine.room,
        Err(err) => {
            tracing::warn!("Could not load current room: {}", err);
            None
        }
    };

    let cards = room_catalog(api.rooms().await?);

    Ok(RoomsView {
        lock_message,
        my_room,
        cards,
    })
}

pub async fn join(api: &ApiClient, session: &Session, room_id: i64) -> Notice {
    let email = match require_email(session) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.user_message("Failed to join.")),
    };
    notice(
        api.join_room(room_id, email).await,
        "Joined successfully.",
        "Failed to join.",
    )
}

pub async fn leave(api: &ApiClient, session: &Session) -> Notice {
    let email = match require_email(session) {
        Ok(email) => email,
        Err(err) => return Notice::Failure(err.user_message("Failed to leave.")),
    };
    notice(api.leave_room(email).await, "Left room.", "Failed to leave.")
}
