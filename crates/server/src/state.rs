//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::AttendeeStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable; the only shared resource is the attendee store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn AttendeeStore>,
}

impl AppState {
    /// Create a new application state over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn AttendeeStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the attendee store.
    #[must_use]
    pub fn store(&self) -> &dyn AttendeeStore {
        self.inner.store.as_ref()
    }
}
