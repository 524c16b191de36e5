//! Fixed-size pagination for attendee listings.

use serde::{Deserialize, Serialize};

/// Number of attendees on one page.
pub const PAGE_SIZE: u32 = 10;

/// Zero-based index of a page of [`PAGE_SIZE`] items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageIndex(u32);

impl PageIndex {
    /// The first page.
    pub const FIRST: Self = Self(0);

    /// Create a page index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.0 as u64 * PAGE_SIZE as u64
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(self) -> u64 {
        PAGE_SIZE as u64
    }
}
