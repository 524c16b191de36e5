//! Attendee domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use passin_core::{AttendeeId, AttendeeName, CheckInId, Email, EventId};

/// A registered attendee of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    /// Store-assigned ID, increasing in creation order.
    pub id: AttendeeId,
    /// Name given at registration.
    pub name: AttendeeName,
    /// Email given at registration; unique within the event.
    pub email: Email,
    /// Event this registration belongs to.
    pub event_id: EventId,
    /// When the registration was created.
    pub created_at: DateTime<Utc>,
}

/// Data needed to create an attendee. The store assigns the ID and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendee {
    pub name: AttendeeName,
    pub email: Email,
    pub event_id: EventId,
}

/// Arrival record for an attendee. At most one exists per attendee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    pub id: CheckInId,
    pub attendee_id: AttendeeId,
    pub created_at: DateTime<Utc>,
}

/// Listing projection of an attendee joined with its optional check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeView {
    pub id: AttendeeId,
    pub name: AttendeeName,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl AttendeeView {
    /// Project an attendee and its check-in, if any.
    #[must_use]
    pub fn project(attendee: Attendee, check_in: Option<&CheckIn>) -> Self {
        Self {
            id: attendee.id,
            name: attendee.name,
            email: attendee.email,
            created_at: attendee.created_at,
            checked_in_at: check_in.map(|c| c.created_at),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn attendee() -> Attendee {
        Attendee {
            id: AttendeeId::new(1),
            name: AttendeeName::parse("Alice Jones").unwrap(),
            email: Email::parse("alice@x.com").unwrap(),
            event_id: EventId::generate(),
            created_at: Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_project_without_check_in() {
        let view = AttendeeView::project(attendee(), None);
        assert_eq!(view.checked_in_at, None);
        assert_eq!(view.name.as_str(), "Alice Jones");
    }

    #[test]
    fn test_project_with_check_in() {
        let checked_in = Utc.with_ymd_and_hms(2024, 4, 2, 8, 30, 0).unwrap();
        let check_in = CheckIn {
            id: CheckInId::new(5),
            attendee_id: AttendeeId::new(1),
            created_at: checked_in,
        };
        let view = AttendeeView::project(attendee(), Some(&check_in));
        assert_eq!(view.checked_in_at, Some(checked_in));
    }

    #[test]
    fn test_view_serializes_camel_case_with_null_check_in() {
        let json = serde_json::to_value(AttendeeView::project(attendee(), None)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "alice@x.com");
        assert!(json["createdAt"].is_string());
        assert!(json["checkedInAt"].is_null());
    }
}
