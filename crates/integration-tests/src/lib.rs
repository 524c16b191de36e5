//! HTTP integration tests for pass.in.
//!
//! Tests drive the full router (`passin_server::routes::app`) with
//! `tower::ServiceExt::oneshot`, backed by the in-memory attendee store, so
//! they need neither a database nor a running server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p passin-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `registration` - `POST /events/{id}/attendees`
//! - `listing` - `GET /events/{id}/attendees`
//! - `health` - liveness and readiness checks

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use passin_core::{AttendeeId, Capacity, EventId};
use passin_server::{
    models::NewEvent,
    routes,
    state::AppState,
    store::{AttendeeStore, memory::MemoryAttendeeStore},
};

/// A router over a fresh in-memory store, plus direct access to that store.
pub struct TestContext {
    pub store: Arc<MemoryAttendeeStore>,
    app: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a router over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryAttendeeStore::new());
        let app = routes::app(AppState::new(store.clone()));
        Self { store, app }
    }

    /// Create an event directly in the store.
    ///
    /// # Panics
    ///
    /// Panics if `maximum_attendees` is not positive.
    pub async fn create_event(&self, maximum_attendees: Option<i64>) -> EventId {
        let maximum_attendees = maximum_attendees
            .map(|m| Capacity::new(m).unwrap_or_else(|e| panic!("bad capacity: {e}")));
        self.store
            .create_event(NewEvent {
                title: "Integration Test Event".to_owned(),
                maximum_attendees,
            })
            .await
            .unwrap_or_else(|e| panic!("create_event failed: {e}"))
            .id
    }

    /// Check an attendee in directly in the store.
    ///
    /// # Panics
    ///
    /// Panics if the store refuses the check-in.
    pub async fn check_in(&self, attendee_id: i32) {
        self.store
            .check_in(AttendeeId::new(attendee_id))
            .await
            .unwrap_or_else(|e| panic!("check_in failed: {e}"));
    }

    /// Send a request and return its status and JSON body (`Null` if not JSON).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|e| panic!("invalid request: {e}"));

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|e| match e {});
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_else(|e| panic!("failed to read body: {e}"));
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// `POST /events/{event_id}/attendees`.
    pub async fn register(&self, event_id: EventId, name: &str, email: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({ "name": name, "email": email });
        self.send(
            Method::POST,
            &format!("/events/{event_id}/attendees"),
            Some(&body),
        )
        .await
    }

    /// `GET /events/{event_id}/attendees` with a raw query string.
    pub async fn list(&self, event_id: EventId, query_string: &str) -> (StatusCode, Value) {
        let uri = if query_string.is_empty() {
            format!("/events/{event_id}/attendees")
        } else {
            format!("/events/{event_id}/attendees?{query_string}")
        };
        self.send(Method::GET, &uri, None).await
    }
}
