//! Attendee store abstraction.
//!
//! The registration and listing services only talk to storage through
//! [`AttendeeStore`]. Two implementations exist:
//!
//! - [`crate::db::attendees::PgAttendeeStore`] - `PostgreSQL`, used in production
//! - [`memory::MemoryAttendeeStore`] - in-process, used by tests and local demos
//!
//! # Invariants every implementation must uphold
//!
//! - `(event_id, email)` is unique: a second `create_attendee` for the same
//!   pair fails with [`RepositoryError::Conflict`] no matter what the caller
//!   checked beforehand.
//! - `create_attendee` re-checks the event's capacity atomically with the
//!   insert and fails with [`RepositoryError::CapacityReached`] when full.
//! - Listings are ordered by `created_at` descending, then `id` descending.

pub mod memory;

use async_trait::async_trait;

use passin_core::{AttendeeId, Email, EventId};

use crate::db::RepositoryError;
use crate::models::{Attendee, CheckIn, Event, NewAttendee, NewEvent};

/// Which attendees a count or listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeFilter {
    pub event_id: EventId,
    /// Case-sensitive substring the name must contain.
    pub name_contains: Option<String>,
}

impl AttendeeFilter {
    /// All attendees of one event.
    #[must_use]
    pub const fn event(event_id: EventId) -> Self {
        Self {
            event_id,
            name_contains: None,
        }
    }

    /// Restrict to names containing `query`. An empty query means no restriction.
    #[must_use]
    pub fn with_name_containing(mut self, query: Option<&str>) -> Self {
        self.name_contains = query.filter(|q| !q.is_empty()).map(str::to_owned);
        self
    }

    /// Returns true if `attendee` falls under this filter.
    #[must_use]
    pub fn matches(&self, attendee: &Attendee) -> bool {
        attendee.event_id == self.event_id
            && self
                .name_contains
                .as_deref()
                .is_none_or(|q| attendee.name.contains(q))
    }
}

/// Durable storage for events, attendees, and check-ins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendeeStore: Send + Sync {
    /// Look up the attendee registered for `event_id` with `email`.
    async fn find_attendee_by_event_and_email(
        &self,
        event_id: EventId,
        email: &Email,
    ) -> Result<Option<Attendee>, RepositoryError>;

    /// Fetch an event by ID.
    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError>;

    /// Count the attendees matching `filter`.
    async fn count_attendees(&self, filter: &AttendeeFilter) -> Result<u64, RepositoryError>;

    /// Insert a new attendee.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered for the event
    /// - `CapacityReached` if the event is full
    /// - `NotFound` if the event does not exist
    async fn create_attendee(&self, attendee: NewAttendee) -> Result<Attendee, RepositoryError>;

    /// Fetch one slice of the attendees matching `filter`, with their check-ins.
    async fn list_attendees(
        &self,
        filter: &AttendeeFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(Attendee, Option<CheckIn>)>, RepositoryError>;

    /// Insert a new event.
    async fn create_event(&self, event: NewEvent) -> Result<Event, RepositoryError>;

    /// Record the arrival of an attendee.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the attendee already checked in
    /// - `NotFound` if the attendee does not exist
    async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckIn, RepositoryError>;

    /// Verify the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
