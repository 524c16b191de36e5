//! Attendee listing endpoint tests.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{Method, StatusCode};
use passin_core::EventId;
use passin_integration_tests::TestContext;
use serde_json::Value;

async fn seed(ctx: &TestContext, event_id: EventId, count: usize) {
    for i in 0..count {
        let (status, _) = ctx
            .register(event_id, &format!("Guest {i:02}"), &format!("guest{i}@x.com"))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

fn ids(page: &Value) -> Vec<i64> {
    page["attendees"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_empty_event_lists_nothing() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;

    let (status, body) = ctx.list(event_id, "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["attendees"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_attendee_shape() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;
    ctx.register(event_id, "Alice Jones", "alice@x.com").await;

    let (_, body) = ctx.list(event_id, "").await;
    let alice = &body["attendees"][0];

    assert_eq!(alice["id"], 1);
    assert_eq!(alice["name"], "Alice Jones");
    assert_eq!(alice["email"], "alice@x.com");
    assert!(alice["createdAt"].is_string());
    assert!(alice["checkedInAt"].is_null());
}

#[tokio::test]
async fn test_pages_of_ten_newest_first() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;
    seed(&ctx, event_id, 23).await;

    let (_, first) = ctx.list(event_id, "").await;
    let (_, second) = ctx.list(event_id, "pageIndex=1").await;
    let (_, third) = ctx.list(event_id, "pageIndex=2").await;
    let (_, beyond) = ctx.list(event_id, "pageIndex=3").await;

    assert_eq!(ids(&first), (14..=23).rev().collect::<Vec<_>>());
    assert_eq!(ids(&second), (4..=13).rev().collect::<Vec<_>>());
    assert_eq!(ids(&third), vec![3, 2, 1]);
    assert!(ids(&beyond).is_empty());

    for page in [&first, &second, &third, &beyond] {
        assert_eq!(page["total"], 23);
    }
}

#[tokio::test]
async fn test_query_filters_by_name_substring() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;
    ctx.register(event_id, "Alice Smith", "alice@x.com").await;
    ctx.register(event_id, "Bob Smith", "bob@x.com").await;
    ctx.register(event_id, "Carl King", "carl@x.com").await;

    let (_, smith) = ctx.list(event_id, "query=Smith").await;
    assert_eq!(smith["total"], 2);
    assert_eq!(ids(&smith), vec![2, 1]);

    let (_, lice) = ctx.list(event_id, "query=lice").await;
    assert_eq!(ids(&lice), vec![1]);

    let (_, lower) = ctx.list(event_id, "query=alice").await;
    assert_eq!(lower["total"], 0);

    let (_, empty) = ctx.list(event_id, "query=").await;
    assert_eq!(empty["total"], 3);
}

#[tokio::test]
async fn test_query_with_spaces_is_decoded() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;
    ctx.register(event_id, "Alice Smith", "alice@x.com").await;
    ctx.register(event_id, "Alicia Smithers", "alicia@x.com").await;

    let (_, body) = ctx.list(event_id, "query=Alice%20Smith").await;

    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn test_checked_in_at_is_reported() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;
    ctx.register(event_id, "Alice Jones", "alice@x.com").await;
    ctx.register(event_id, "Bob Lee", "bob@x.com").await;
    ctx.check_in(1).await;

    let (_, body) = ctx.list(event_id, "").await;

    assert!(body["attendees"][0]["checkedInAt"].is_null());
    assert!(body["attendees"][1]["checkedInAt"].is_string());
}

#[tokio::test]
async fn test_invalid_page_index_is_rejected() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;

    for query_string in ["pageIndex=-1", "pageIndex=two"] {
        let (status, body) = ctx.list(event_id, query_string).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query_string}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_malformed_event_id_is_rejected() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send(Method::GET, "/events/1234/attendees", None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_event_lists_nothing() {
    let ctx = TestContext::new();

    let (status, body) = ctx.list(EventId::generate(), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_empty_page_index_means_first_page() {
    let ctx = TestContext::new();
    let event_id = ctx.create_event(None).await;
    seed(&ctx, event_id, 12).await;

    let (status, body) = ctx.list(event_id, "pageIndex=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (3..=12).rev().collect::<Vec<_>>());
}
