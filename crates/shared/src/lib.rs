//! Data model and view-model for the campusbook client.
//!
//! Everything in here is a pure function of server records, the session
//! and an explicit `now`; the network and terminal live in the CLI crate.

pub mod availability;
pub mod lifecycle;
pub mod models;
pub mod ordering;
pub mod pagination;
pub mod session;
pub mod validation;

pub use availability::{classify_event, classify_room, is_past, Availability, EventCard, RoomCard};
pub use lifecycle::{AdminControls, AdminRequestCard, Decision, OwnerRequestCard, PermittedActions};
pub use models::*;
pub use pagination::{Pager, PagerControls, DEFAULT_PAGE_SIZE};
pub use session::{Role, Session};
pub use validation::{RequestForm, ValidationError};
