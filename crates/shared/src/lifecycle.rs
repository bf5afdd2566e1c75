//! What a viewer may do with an event request, and how it reads.
//!
//! Requests start pending and leave that state exactly once, through an
//! administrator decision. Hiding is a per-owner visibility flag on top of
//! that and never changes the status.

use crate::models::{EventRequest, RequestStatus};
use crate::validation::ValidationError;

pub const PENDING_HINT: &str = "Pending (cannot remove)";
pub const PUBLISHED_NOTE: &str = "Accepted and published.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermittedActions {
    /// Owner may hide the request from their own list.
    pub can_hide: bool,
    /// Administrator may accept or reject.
    pub can_decide: bool,
}

pub fn permitted_actions(status: RequestStatus) -> PermittedActions {
    PermittedActions {
        can_hide: status.is_terminal(),
        can_decide: status == RequestStatus::Pending,
    }
}

/// An administrator decision on a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject { comment: String },
}

impl Decision {
    /// A rejection must explain itself; blank comments never leave the client.
    pub fn reject(comment: &str) -> Result<Self, ValidationError> {
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ValidationError::EmptyRejectComment);
        }
        Ok(Self::Reject {
            comment: comment.to_string(),
        })
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject { .. } => "reject",
        }
    }

    pub fn comment(&self) -> &str {
        match self {
            Self::Accept => "",
            Self::Reject { comment } => comment,
        }
    }

    pub fn outcome(&self) -> RequestStatus {
        match self {
            Self::Accept => RequestStatus::Accepted,
            Self::Reject { .. } => RequestStatus::Rejected,
        }
    }
}

pub fn quota_text(quota: Option<i64>) -> String {
    match quota {
        Some(quota) => quota.to_string(),
        None => "unlimited".to_string(),
    }
}

/// A request as its owner sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerRequestCard {
    pub request: EventRequest,
    pub actions: PermittedActions,
    /// Shown in place of the hide control while the request is pending.
    pub hide_hint: Option<&'static str>,
    /// The administrator's reason, verbatim, for rejected requests.
    pub comment: Option<String>,
}

impl OwnerRequestCard {
    pub fn new(request: EventRequest) -> Self {
        let actions = permitted_actions(request.status);
        let hide_hint = (!actions.can_hide).then_some(PENDING_HINT);
        let comment = match request.status {
            RequestStatus::Rejected => request
                .admin_comment
                .clone()
                .filter(|comment| !comment.is_empty()),
            _ => None,
        };
        Self {
            request,
            actions,
            hide_hint,
            comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminControls {
    /// Accept, or reject with a required comment.
    Decide,
    /// Rejected; the comment is shown even when empty.
    Comment(String),
    Published,
}

impl AdminControls {
    pub fn note(&self) -> Option<String> {
        match self {
            Self::Decide => None,
            Self::Comment(comment) => Some(format!("Admin comment: {comment}")),
            Self::Published => Some(PUBLISHED_NOTE.to_string()),
        }
    }
}

/// A request as an administrator sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRequestCard {
    pub request: EventRequest,
    pub controls: AdminControls,
    pub quota_text: String,
}

impl AdminRequestCard {
    pub fn new(request: EventRequest) -> Self {
        let controls = match request.status {
            RequestStatus::Pending => AdminControls::Decide,
            RequestStatus::Rejected => {
                AdminControls::Comment(request.admin_comment.clone().unwrap_or_default())
            }
            RequestStatus::Accepted => AdminControls::Published,
        };
        let quota_text = quota_text(request.quota);
        Self {
            request,
            controls,
            quota_text,
        }
    }
}
