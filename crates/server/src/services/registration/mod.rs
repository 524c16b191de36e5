//! Registration admission service.
//!
//! Decides whether a registration may proceed and, if so, creates it.
//! Checks run in a fixed order, which fixes which error wins when several
//! apply:
//!
//! 1. Duplicate `(event, email)` - nothing else is looked at.
//! 2. Event lookup and attendee count, fetched concurrently.
//! 3. Capacity.
//! 4. Insert.
//!
//! Steps 1-3 are a fast path. The store re-checks uniqueness and capacity
//! atomically with the insert, and its refusals are reported as the same
//! outcomes, so racing registrations cannot break either invariant.

mod error;

pub use error::RegistrationError;

use tracing::instrument;

use passin_core::{AttendeeId, AttendeeName, Email, EventId};

use crate::db::RepositoryError;
use crate::models::NewAttendee;
use crate::store::{AttendeeFilter, AttendeeStore};

/// Registration admission service.
pub struct RegistrationService<'a> {
    store: &'a dyn AttendeeStore,
}

impl<'a> RegistrationService<'a> {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(store: &'a dyn AttendeeStore) -> Self {
        Self { store }
    }

    /// Register `email` under `name` for an event.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::DuplicateRegistration` if the email is already registered.
    /// Returns `RegistrationError::EventNotFound` if the event does not exist.
    /// Returns `RegistrationError::CapacityExceeded` if the event is full.
    /// Returns `RegistrationError::Store` if the store fails.
    #[instrument(skip_all, fields(event_id = %event_id))]
    pub async fn register(
        &self,
        event_id: EventId,
        name: AttendeeName,
        email: Email,
    ) -> Result<AttendeeId, RegistrationError> {
        if self
            .store
            .find_attendee_by_event_and_email(event_id, &email)
            .await?
            .is_some()
        {
            return Err(RegistrationError::DuplicateRegistration);
        }

        let filter = AttendeeFilter::event(event_id);
        let (event, registered) = tokio::try_join!(
            self.store.get_event(event_id),
            self.store.count_attendees(&filter),
        )?;

        let event = event.ok_or(RegistrationError::EventNotFound)?;

        if let Some(capacity) = event.maximum_attendees
            && capacity.is_reached_by(registered)
        {
            return Err(RegistrationError::CapacityExceeded);
        }

        let attendee = self
            .store
            .create_attendee(NewAttendee {
                name,
                email,
                event_id,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => {
                    tracing::warn!("concurrent registration claimed the same email");
                    RegistrationError::DuplicateRegistration
                }
                RepositoryError::CapacityReached => {
                    tracing::warn!("concurrent registrations filled the event");
                    RegistrationError::CapacityExceeded
                }
                RepositoryError::NotFound => RegistrationError::EventNotFound,
                other => RegistrationError::Store(other),
            })?;

        tracing::info!(attendee_id = %attendee.id, "attendee registered");

        Ok(attendee.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::eq;

    use passin_core::Capacity;

    use super::*;
    use crate::models::{Attendee, Event, NewEvent};
    use crate::store::MockAttendeeStore;
    use crate::store::memory::MemoryAttendeeStore;

    fn name(s: &str) -> AttendeeName {
        AttendeeName::parse(s).unwrap()
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    async fn event_with_capacity(store: &MemoryAttendeeStore, max: Option<i64>) -> EventId {
        store
            .create_event(NewEvent {
                title: "Rust Conf".to_owned(),
                maximum_attendees: max.map(|m| Capacity::new(m).unwrap()),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_second_registration_with_same_email_is_duplicate() {
        let store = MemoryAttendeeStore::new();
        let event_id = event_with_capacity(&store, None).await;
        let service = RegistrationService::new(&store);

        service
            .register(event_id, name("Alice Jones"), email("alice@x.com"))
            .await
            .unwrap();
        let err = service
            .register(event_id, name("Someone Else"), email("alice@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::DuplicateRegistration));
    }

    #[tokio::test]
    async fn test_capacity_admits_exactly_k() {
        let store = MemoryAttendeeStore::new();
        let event_id = event_with_capacity(&store, Some(3)).await;
        let service = RegistrationService::new(&store);

        for i in 0..3 {
            service
                .register(event_id, name("Guest Name"), email(&format!("g{i}@x.com")))
                .await
                .unwrap();
        }
        let err = service
            .register(event_id, name("Guest Name"), email("late@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::CapacityExceeded));
    }

    #[tokio::test]
    async fn test_unlimited_event_keeps_admitting() {
        let store = MemoryAttendeeStore::new();
        let event_id = event_with_capacity(&store, None).await;
        let service = RegistrationService::new(&store);

        for i in 0..50 {
            service
                .register(event_id, name("Guest Name"), email(&format!("g{i}@x.com")))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_scenario_duplicate_wins_over_capacity() {
        let store = MemoryAttendeeStore::new();
        let event_id = event_with_capacity(&store, Some(2)).await;
        let service = RegistrationService::new(&store);

        let alice = service
            .register(event_id, name("Alice Jones"), email("alice@x.com"))
            .await
            .unwrap();
        let bob = service
            .register(event_id, name("Bob Lee"), email("bob@x.com"))
            .await
            .unwrap();
        assert_eq!(alice, AttendeeId::new(1));
        assert_eq!(bob, AttendeeId::new(2));

        let carl = service
            .register(event_id, name("Carl King"), email("carl@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(carl, RegistrationError::CapacityExceeded));

        let again = service
            .register(event_id, name("Alice2"), email("alice@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(again, RegistrationError::DuplicateRegistration));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_admit_exactly_capacity() {
        let store = Arc::new(MemoryAttendeeStore::new());
        let event_id = event_with_capacity(&store, Some(5)).await;

        let tasks: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                let email = email(&format!("g{}@x.com", i % 10));
                tokio::spawn(async move {
                    RegistrationService::new(store.as_ref())
                        .register(event_id, name("Guest Name"), email)
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(
                    RegistrationError::DuplicateRegistration | RegistrationError::CapacityExceeded,
                ) => {}
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 5);
        assert_eq!(
            store
                .count_attendees(&AttendeeFilter::event(event_id))
                .await
                .unwrap(),
            5
        );
    }

    #[tokio::test]
    async fn test_unknown_event_is_rejected() {
        let store = MemoryAttendeeStore::new();
        let service = RegistrationService::new(&store);

        let err = service
            .register(EventId::generate(), name("Alice Jones"), email("alice@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::EventNotFound));
    }

    #[tokio::test]
    async fn test_duplicate_short_circuits_remaining_store_calls() {
        let event_id = EventId::generate();
        let existing = Attendee {
            id: AttendeeId::new(1),
            name: name("Alice Jones"),
            email: email("alice@x.com"),
            event_id,
            created_at: Utc::now(),
        };

        let mut store = MockAttendeeStore::new();
        store
            .expect_find_attendee_by_event_and_email()
            .with(eq(event_id), eq(email("alice@x.com")))
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        store.expect_get_event().times(0);
        store.expect_count_attendees().times(0);
        store.expect_create_attendee().times(0);

        let err = RegistrationService::new(&store)
            .register(event_id, name("Alice2"), email("alice@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateRegistration));
    }

    #[tokio::test]
    async fn test_full_event_never_inserts() {
        let event_id = EventId::generate();
        let event = Event {
            id: event_id,
            title: "Full House".to_owned(),
            maximum_attendees: Some(Capacity::new(2).unwrap()),
            created_at: Utc::now(),
        };

        let mut store = MockAttendeeStore::new();
        store
            .expect_find_attendee_by_event_and_email()
            .returning(|_, _| Ok(None));
        store
            .expect_get_event()
            .returning(move |_| Ok(Some(event.clone())));
        store.expect_count_attendees().returning(|_| Ok(2));
        store.expect_create_attendee().times(0);

        let err = RegistrationService::new(&store)
            .register(event_id, name("Carl King"), email("carl@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::CapacityExceeded));
    }

    #[tokio::test]
    async fn test_store_backstops_map_to_typed_outcomes() {
        let cases = [
            (
                RepositoryError::Conflict("unique".to_owned()),
                "This e-mail is already registered for this event.",
            ),
            (
                RepositoryError::CapacityReached,
                "The maximum number of attendees for this event has been reached.",
            ),
        ];

        for (backstop, message) in cases {
            let event_id = EventId::generate();
            let event = Event {
                id: event_id,
                title: "Race".to_owned(),
                maximum_attendees: None,
                created_at: Utc::now(),
            };
            let mut failure = Some(backstop);

            let mut store = MockAttendeeStore::new();
            store
                .expect_find_attendee_by_event_and_email()
                .returning(|_, _| Ok(None));
            store
                .expect_get_event()
                .returning(move |_| Ok(Some(event.clone())));
            store.expect_count_attendees().returning(|_| Ok(0));
            store
                .expect_create_attendee()
                .times(1)
                .returning(move |_| Err(failure.take().unwrap()));

            let err = RegistrationService::new(&store)
                .register(event_id, name("Dana Ray"), email("dana@x.com"))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockAttendeeStore::new();
        store
            .expect_find_attendee_by_event_and_email()
            .returning(|_, _| Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)));

        let err = RegistrationService::new(&store)
            .register(EventId::generate(), name("Dana Ray"), email("dana@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::Store(RepositoryError::Database(_))
        ));
    }
}
