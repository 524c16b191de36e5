//! Attendee check-in command.
//!
//! # Usage
//!
//! ```bash
//! passin-cli check-in --attendee-id 42
//! ```

use passin_core::AttendeeId;
use passin_server::db::RepositoryError;
use passin_server::models::CheckIn;
use passin_server::store::AttendeeStore;
use thiserror::Error;

use super::ConnectError;

/// Errors that can occur while checking an attendee in.
#[derive(Debug, Error)]
pub enum CheckInError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("No attendee with ID {0}")]
    AttendeeNotFound(AttendeeId),

    #[error("Attendee {0} is already checked in")]
    AlreadyCheckedIn(AttendeeId),

    #[error("Database error: {0}")]
    Store(RepositoryError),
}

/// Record the arrival of an attendee.
pub async fn record(attendee_id: AttendeeId) -> Result<CheckIn, CheckInError> {
    let store = super::connect_store().await?;

    let check_in = store.check_in(attendee_id).await.map_err(|e| match e {
        RepositoryError::NotFound => CheckInError::AttendeeNotFound(attendee_id),
        RepositoryError::Conflict(_) => CheckInError::AlreadyCheckedIn(attendee_id),
        other => CheckInError::Store(other),
    })?;

    tracing::info!(
        "Attendee {} checked in at {}",
        check_in.attendee_id,
        check_in.created_at
    );

    Ok(check_in)
}
