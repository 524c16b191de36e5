//! Per-event attendee capacity.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Capacity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// Capacity must be a positive integer.
    #[error("maximum attendees must be a positive integer (got {0})")]
    NotPositive(i64),
}

/// Maximum number of attendees an event admits.
///
/// An event without a `Capacity` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capacity(NonZeroU32);

impl Capacity {
    /// Build a capacity from any integer, rejecting zero and negatives.
    ///
    /// # Errors
    ///
    /// Returns `CapacityError::NotPositive` for values below 1 or above `u32::MAX`.
    pub fn new(value: i64) -> Result<Self, CapacityError> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(CapacityError::NotPositive(value))
    }

    /// Get the capacity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns true when `registered` attendees already fill the event.
    #[must_use]
    pub fn is_reached_by(self, registered: u64) -> bool {
        registered >= u64::from(self.get())
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(Capacity::new(0), Err(CapacityError::NotPositive(0)));
        assert_eq!(Capacity::new(-3), Err(CapacityError::NotPositive(-3)));
        assert!(Capacity::new(i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_is_reached_by() {
        let capacity = Capacity::new(2).unwrap();
        assert!(!capacity.is_reached_by(0));
        assert!(!capacity.is_reached_by(1));
        assert!(capacity.is_reached_by(2));
        assert!(capacity.is_reached_by(3));
    }
}
