//! In-process [`AttendeeStore`] for tests and local runs without a database.
//!
//! All state sits behind one mutex, so every operation is atomic and the
//! uniqueness and capacity checks in `create_attendee` cannot interleave.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use passin_core::{AttendeeId, CheckInId, Email, EventId};

use super::{AttendeeFilter, AttendeeStore};
use crate::db::RepositoryError;
use crate::models::{Attendee, CheckIn, Event, NewAttendee, NewEvent};

#[derive(Debug, Default)]
struct Tables {
    events: Vec<Event>,
    attendees: Vec<Attendee>,
    check_ins: Vec<CheckIn>,
    next_attendee_id: i32,
    next_check_in_id: i32,
}

impl Tables {
    fn check_in_of(&self, attendee_id: AttendeeId) -> Option<&CheckIn> {
        self.check_ins.iter().find(|c| c.attendee_id == attendee_id)
    }
}

/// Attendee store held entirely in memory.
#[derive(Debug)]
pub struct MemoryAttendeeStore {
    tables: Mutex<Tables>,
    clock: fn() -> DateTime<Utc>,
}

impl Default for MemoryAttendeeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAttendeeStore {
    /// Create an empty store stamping records with the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create an empty store stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("store mutex poisoned".to_owned()))
    }
}

#[async_trait]
impl AttendeeStore for MemoryAttendeeStore {
    async fn find_attendee_by_event_and_email(
        &self,
        event_id: EventId,
        email: &Email,
    ) -> Result<Option<Attendee>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .attendees
            .iter()
            .find(|a| a.event_id == event_id && &a.email == email)
            .cloned())
    }

    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn count_attendees(&self, filter: &AttendeeFilter) -> Result<u64, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.attendees.iter().filter(|a| filter.matches(a)).count() as u64)
    }

    async fn create_attendee(&self, attendee: NewAttendee) -> Result<Attendee, RepositoryError> {
        let mut tables = self.lock()?;

        let capacity = tables
            .events
            .iter()
            .find(|e| e.id == attendee.event_id)
            .ok_or(RepositoryError::NotFound)?
            .maximum_attendees;

        if tables
            .attendees
            .iter()
            .any(|a| a.event_id == attendee.event_id && a.email == attendee.email)
        {
            return Err(RepositoryError::Conflict(
                "email already registered for this event".to_owned(),
            ));
        }

        if let Some(capacity) = capacity {
            let registered = tables
                .attendees
                .iter()
                .filter(|a| a.event_id == attendee.event_id)
                .count() as u64;
            if capacity.is_reached_by(registered) {
                return Err(RepositoryError::CapacityReached);
            }
        }

        tables.next_attendee_id += 1;
        let created = Attendee {
            id: AttendeeId::new(tables.next_attendee_id),
            name: attendee.name,
            email: attendee.email,
            event_id: attendee.event_id,
            created_at: (self.clock)(),
        };
        tables.attendees.push(created.clone());

        Ok(created)
    }

    async fn list_attendees(
        &self,
        filter: &AttendeeFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(Attendee, Option<CheckIn>)>, RepositoryError> {
        let tables = self.lock()?;

        let mut matching: Vec<&Attendee> =
            tables.attendees.iter().filter(|a| filter.matches(a)).collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|a| (a.clone(), tables.check_in_of(a.id).cloned()))
            .collect())
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, RepositoryError> {
        let mut tables = self.lock()?;
        let created = Event {
            id: EventId::generate(),
            title: event.title,
            maximum_attendees: event.maximum_attendees,
            created_at: (self.clock)(),
        };
        tables.events.push(created.clone());
        Ok(created)
    }

    async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckIn, RepositoryError> {
        let mut tables = self.lock()?;

        if !tables.attendees.iter().any(|a| a.id == attendee_id) {
            return Err(RepositoryError::NotFound);
        }
        if tables.check_in_of(attendee_id).is_some() {
            return Err(RepositoryError::Conflict(
                "attendee already checked in".to_owned(),
            ));
        }

        tables.next_check_in_id += 1;
        let check_in = CheckIn {
            id: CheckInId::new(tables.next_check_in_id),
            attendee_id,
            created_at: (self.clock)(),
        };
        tables.check_ins.push(check_in.clone());
        Ok(check_in)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.lock().map(|_| ())
    }
}
