//! `PostgreSQL` implementation of [`AttendeeStore`].
//!
//! Registration inserts lock the event row (`SELECT ... FOR UPDATE`) for the
//! length of the transaction, so the duplicate check, the capacity check, and
//! the insert run while no other registration for the same event can
//! interleave. The `attendees_event_id_email_key` unique constraint backs
//! email uniqueness.
//!
//! Rows are stamped with `clock_timestamp()` rather than the transaction
//! start time, so a registration that waited on the lock sorts after the one
//! it waited for.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use passin_core::{AttendeeId, AttendeeName, Capacity, CheckInId, Email, EventId};

use super::RepositoryError;
use crate::models::{Attendee, CheckIn, Event, NewAttendee, NewEvent};
use crate::store::{AttendeeFilter, AttendeeStore};

/// Attendee store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgAttendeeStore {
    pool: PgPool,
}

impl PgAttendeeStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AttendeeRow {
    id: AttendeeId,
    name: AttendeeName,
    email: Email,
    event_id: EventId,
    created_at: DateTime<Utc>,
}

impl From<AttendeeRow> for Attendee {
    fn from(row: AttendeeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            event_id: row.event_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AttendeeWithCheckInRow {
    #[sqlx(flatten)]
    attendee: AttendeeRow,
    check_in_id: Option<CheckInId>,
    checked_in_at: Option<DateTime<Utc>>,
}

impl From<AttendeeWithCheckInRow> for (Attendee, Option<CheckIn>) {
    fn from(row: AttendeeWithCheckInRow) -> Self {
        let attendee = Attendee::from(row.attendee);
        let check_in = row
            .check_in_id
            .zip(row.checked_in_at)
            .map(|(id, created_at)| CheckIn {
                id,
                attendee_id: attendee.id,
                created_at,
            });
        (attendee, check_in)
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: EventId,
    title: String,
    maximum_attendees: Option<i32>,
    created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = RepositoryError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let maximum_attendees = row
            .maximum_attendees
            .map(|max| Capacity::new(i64::from(max)))
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid capacity in database: {e}"))
            })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            maximum_attendees,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CheckInRow {
    id: CheckInId,
    attendee_id: AttendeeId,
    created_at: DateTime<Utc>,
}

fn count_to_u64(count: i64) -> Result<u64, RepositoryError> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative row count: {count}")))
}

fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl AttendeeStore for PgAttendeeStore {
    async fn find_attendee_by_event_and_email(
        &self,
        event_id: EventId,
        email: &Email,
    ) -> Result<Option<Attendee>, RepositoryError> {
        let row = sqlx::query_as::<_, AttendeeRow>(
            r"
            SELECT id, name, email, event_id, created_at
            FROM attendees
            WHERE event_id = $1 AND email = $2
            ",
        )
        .bind(event_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Attendee::from))
    }

    async fn get_event(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError> {
        let row = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, title, maximum_attendees, created_at
            FROM events
            WHERE id = $1
            ",
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    async fn count_attendees(&self, filter: &AttendeeFilter) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM attendees
            WHERE event_id = $1
              AND ($2::text IS NULL OR strpos(name, $2) > 0)
            ",
        )
        .bind(filter.event_id)
        .bind(filter.name_contains.as_deref())
        .fetch_one(&self.pool)
        .await?;

        count_to_u64(count)
    }

    async fn create_attendee(&self, attendee: NewAttendee) -> Result<Attendee, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let event = sqlx::query_as::<_, EventRow>(
            r"
            SELECT id, title, maximum_attendees, created_at
            FROM events
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(attendee.event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::NotFound)
        .and_then(Event::try_from)?;

        // With the event row locked, a duplicate found here is final and
        // outranks a full event.
        let existing: Option<AttendeeId> =
            sqlx::query_scalar("SELECT id FROM attendees WHERE event_id = $1 AND email = $2")
                .bind(attendee.event_id)
                .bind(&attendee.email)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(RepositoryError::Conflict(
                "email already registered for this event".to_owned(),
            ));
        }

        if let Some(capacity) = event.maximum_attendees {
            let registered: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM attendees WHERE event_id = $1")
                    .bind(attendee.event_id)
                    .fetch_one(&mut *tx)
                    .await?;

            if capacity.is_reached_by(count_to_u64(registered)?) {
                return Err(RepositoryError::CapacityReached);
            }
        }

        let row = sqlx::query_as::<_, AttendeeRow>(
            r"
            INSERT INTO attendees (name, email, event_id, created_at)
            VALUES ($1, $2, $3, clock_timestamp())
            RETURNING id, name, email, event_id, created_at
            ",
        )
        .bind(&attendee.name)
        .bind(&attendee.email)
        .bind(attendee.event_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(
                    "email already registered for this event".to_owned(),
                );
            }
            RepositoryError::Database(e)
        })?;

        tx.commit().await?;

        Ok(Attendee::from(row))
    }

    async fn list_attendees(
        &self,
        filter: &AttendeeFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<(Attendee, Option<CheckIn>)>, RepositoryError> {
        let rows = sqlx::query_as::<_, AttendeeWithCheckInRow>(
            r"
            SELECT a.id, a.name, a.email, a.event_id, a.created_at,
                   c.id AS check_in_id,
                   c.created_at AS checked_in_at
            FROM attendees a
            LEFT JOIN check_ins c ON c.attendee_id = a.id
            WHERE a.event_id = $1
              AND ($2::text IS NULL OR strpos(a.name, $2) > 0)
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(filter.event_id)
        .bind(filter.name_contains.as_deref())
        .bind(to_sql_bound(limit))
        .bind(to_sql_bound(offset))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(<(Attendee, Option<CheckIn>)>::from)
            .collect())
    }

    async fn create_event(&self, event: NewEvent) -> Result<Event, RepositoryError> {
        let maximum_attendees = event
            .maximum_attendees
            .map(|capacity| {
                i32::try_from(capacity.get()).map_err(|_| {
                    RepositoryError::Conflict(format!("capacity {capacity} is too large"))
                })
            })
            .transpose()?;

        let row = sqlx::query_as::<_, EventRow>(
            r"
            INSERT INTO events (id, title, maximum_attendees)
            VALUES ($1, $2, $3)
            RETURNING id, title, maximum_attendees, created_at
            ",
        )
        .bind(EventId::generate())
        .bind(&event.title)
        .bind(maximum_attendees)
        .fetch_one(&self.pool)
        .await?;

        Event::try_from(row)
    }

    async fn check_in(&self, attendee_id: AttendeeId) -> Result<CheckIn, RepositoryError> {
        let row = sqlx::query_as::<_, CheckInRow>(
            r"
            INSERT INTO check_ins (attendee_id, created_at)
            VALUES ($1, clock_timestamp())
            RETURNING id, attendee_id, created_at
            ",
        )
        .bind(attendee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return RepositoryError::Conflict("attendee already checked in".to_owned());
                }
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::NotFound;
                }
            }
            RepositoryError::Database(e)
        })?;

        Ok(CheckIn {
            id: row.id,
            attendee_id: row.attendee_id,
            created_at: row.created_at,
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
