//! Client-side form checks. They only save a round trip; the server
//! repeats every one of them.

use thiserror::Error;

use crate::models::NewEventRequest;
use crate::session::normalize_email;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields (quota optional).")]
    MissingFields,

    #[error("Quota must be empty (unlimited) or a non-negative number.")]
    InvalidQuota,

    #[error("Rejection comment is required.")]
    EmptyRejectComment,

    #[error("Pending requests cannot be hidden.")]
    PendingNotHideable,

    #[error("Only pending requests can be decided.")]
    NotPending,

    #[error("Enter an email.")]
    MissingEmail,

    #[error("Not logged in. Run 'campusbook login' first.")]
    NotLoggedIn,

    #[error("Admin access required. Login with admin account.")]
    AdminRequired,
}

/// Raw text as typed into the new event request form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestForm {
    pub title: String,
    pub category: String,
    pub date_time: String,
    pub location: String,
    pub description: String,
    /// Empty means unlimited.
    pub quota: String,
}

impl RequestForm {
    pub fn validate(&self, email: &str) -> Result<NewEventRequest, ValidationError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(ValidationError::NotLoggedIn);
        }

        let fields = [
            self.title.trim(),
            self.category.trim(),
            self.date_time.trim(),
            self.location.trim(),
            self.description.trim(),
        ];
        if fields.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        Ok(NewEventRequest {
            email,
            title: fields[0].to_string(),
            category: fields[1].to_string(),
            date_time: fields[2].to_string(),
            location: fields[3].to_string(),
            description: fields[4].to_string(),
            quota: parse_quota(&self.quota)?,
        })
    }
}

pub fn parse_quota(raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i64>() {
        Ok(quota) if quota >= 0 => Ok(Some(quota)),
        _ => Err(ValidationError::InvalidQuota),
    }
}

/// Trimmed, lowercased email, refusing blanks.
pub fn require_email(raw: &str) -> Result<String, ValidationError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    Ok(email)
}
