//! Event domain types.

use chrono::{DateTime, Utc};

use passin_core::{Capacity, EventId};

/// An event attendees register for.
///
/// Events are read-only for the registration service; they are created
/// through the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// `None` means the event admits any number of attendees.
    pub maximum_attendees: Option<Capacity>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub maximum_attendees: Option<Capacity>,
}
