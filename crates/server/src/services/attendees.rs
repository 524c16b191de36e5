//! Attendee listing service.
//!
//! Returns one page of an event's attendees, newest registration first,
//! together with the number of attendees matching the filter across all
//! pages. The count and the page are fetched concurrently and are not read
//! from one snapshot, so under concurrent registrations `total` can drift
//! from the sum of page lengths.

use serde::Serialize;
use tracing::instrument;

use passin_core::{EventId, PageIndex};

use crate::db::RepositoryError;
use crate::models::AttendeeView;
use crate::store::{AttendeeFilter, AttendeeStore};

/// One page of attendees plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendeePage {
    pub attendees: Vec<AttendeeView>,
    pub total: u64,
}

/// Attendee listing service.
pub struct AttendeeQueryService<'a> {
    store: &'a dyn AttendeeStore,
}

impl<'a> AttendeeQueryService<'a> {
    /// Create a new listing service.
    #[must_use]
    pub const fn new(store: &'a dyn AttendeeStore) -> Self {
        Self { store }
    }

    /// List attendees of `event_id` whose name contains `query`.
    ///
    /// An empty or absent `query` lists every attendee of the event.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        event_id: EventId,
        query: Option<&str>,
        page: PageIndex,
    ) -> Result<AttendeePage, RepositoryError> {
        let filter = AttendeeFilter::event(event_id).with_name_containing(query);

        let (rows, total) = tokio::try_join!(
            self.store
                .list_attendees(&filter, page.offset(), page.limit()),
            self.store.count_attendees(&filter),
        )?;

        let attendees = rows
            .into_iter()
            .map(|(attendee, check_in)| AttendeeView::project(attendee, check_in.as_ref()))
            .collect();

        Ok(AttendeePage { attendees, total })
    }
}
