//! One controller per screen of the booking site. Each takes the API client
//! and the session explicitly and returns a view or a [`Notice`]; a failure
//! stays local to the action that caused it.

pub mod admin;
pub mod auth;
pub mod events;
pub mod inbox;
pub mod info;
pub mod requests;
pub mod rooms;

use shared::{MessageReply, Session, ValidationError};

use crate::api::ApiResult;
use crate::error::ClientError;
use crate::render::Notice;

pub(crate) fn require_email(session: &Session) -> Result<&str, ClientError> {
    if !session.is_logged_in() {
        return Err(ValidationError::NotLoggedIn.into());
    }
    Ok(session.email())
}

pub(crate) fn require_admin(session: &Session) -> Result<&str, ClientError> {
    if !session.is_admin() {
        return Err(ValidationError::AdminRequired.into());
    }
    Ok(session.email())
}

/// Maps a mutation result to the text shown after it.
pub(crate) fn notice(result: ApiResult<MessageReply>, success: &str, fallback: &str) -> Notice {
    match result {
        Ok(_) => Notice::Success(success.to_string()),
        Err(err) => Notice::Failure(err.user_message(fallback)),
    }
}
