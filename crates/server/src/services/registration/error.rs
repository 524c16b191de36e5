//! Registration error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Reasons a registration is not admitted.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The email is already registered for this event.
    #[error("This e-mail is already registered for this event.")]
    DuplicateRegistration,

    /// The event already holds its maximum number of attendees.
    #[error("The maximum number of attendees for this event has been reached.")]
    CapacityExceeded,

    /// The event does not exist.
    #[error("Event not found.")]
    EventNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Store(#[from] RepositoryError),
}
