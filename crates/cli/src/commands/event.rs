//! Event management commands.
//!
//! Events are not created over HTTP; operators set them up here.
//!
//! # Usage
//!
//! ```bash
//! # Event with a capacity of 120
//! passin-cli event create --title "Rust Meetup" --maximum-attendees 120
//!
//! # Event without a capacity
//! passin-cli event create --title "Open House"
//! ```

use passin_core::{Capacity, CapacityError, EventId};
use passin_server::db::RepositoryError;
use passin_server::models::NewEvent;
use passin_server::store::AttendeeStore;
use thiserror::Error;

use super::ConnectError;

/// Errors that can occur during event operations.
#[derive(Debug, Error)]
pub enum EventError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// Title is blank.
    #[error("Event title must not be empty")]
    EmptyTitle,

    /// Capacity is not a positive number.
    #[error("Invalid maximum attendees: {0}")]
    InvalidCapacity(#[from] CapacityError),

    #[error("Database error: {0}")]
    Store(#[from] RepositoryError),
}

/// Validate the arguments of `event create`.
pub fn new_event(title: &str, maximum_attendees: Option<i64>) -> Result<NewEvent, EventError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(EventError::EmptyTitle);
    }

    Ok(NewEvent {
        title: title.to_owned(),
        maximum_attendees: maximum_attendees.map(Capacity::new).transpose()?,
    })
}

/// Create a new event.
///
/// # Returns
///
/// The ID of the created event.
pub async fn create(title: &str, maximum_attendees: Option<i64>) -> Result<EventId, EventError> {
    let event = new_event(title, maximum_attendees)?;
    let store = super::connect_store().await?;

    tracing::info!("Creating event: {}", event.title);
    let event = store.create_event(event).await?;

    match event.maximum_attendees {
        Some(capacity) => tracing::info!(
            "Event created! ID: {}, Title: {}, Capacity: {}",
            event.id,
            event.title,
            capacity
        ),
        None => tracing::info!(
            "Event created! ID: {}, Title: {}, Capacity: unlimited",
            event.id,
            event.title
        ),
    }

    Ok(event.id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_trims_title() {
        let event = new_event("  Rust Meetup ", Some(120)).unwrap();
        assert_eq!(event.title, "Rust Meetup");
        assert_eq!(event.maximum_attendees.map(Capacity::get), Some(120));
    }

    #[test]
    fn test_new_event_without_capacity() {
        let event = new_event("Open House", None).unwrap();
        assert!(event.maximum_attendees.is_none());
    }

    #[test]
    fn test_new_event_rejects_blank_title() {
        assert!(matches!(new_event("   ", None), Err(EventError::EmptyTitle)));
    }

    #[test]
    fn test_new_event_rejects_non_positive_capacity() {
        assert!(matches!(
            new_event("Rust Meetup", Some(0)),
            Err(EventError::InvalidCapacity(_))
        ));
        assert!(matches!(
            new_event("Rust Meetup", Some(-3)),
            Err(EventError::InvalidCapacity(_))
        ));
    }
}
