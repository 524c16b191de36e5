//! Attendee route handlers.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

use passin_core::{AttendeeId, AttendeeName, Email, EventId, PageIndex};

use crate::error::{AppError, Result};
use crate::services::{AttendeePage, AttendeeQueryService, RegistrationService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
}

/// Registration response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub attendee_id: AttendeeId,
}

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub query: Option<String>,
    #[serde(rename = "pageIndex", default, deserialize_with = "empty_as_none")]
    pub page_index: Option<u32>,
}

/// `pageIndex=` with no value means the first page.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            de::Error::custom(format!(
                "pageIndex must be a non-negative integer (got {raw:?})"
            ))
        }),
    }
}

fn event_id(path: std::result::Result<Path<Uuid>, PathRejection>) -> Result<EventId> {
    let Path(id) = path.map_err(|_| AppError::Validation("Invalid event id.".to_string()))?;
    Ok(EventId::from(id))
}

/// Register an attendee for an event.
///
/// POST /events/{event_id}/attendees
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let event_id = event_id(path)?;
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;

    let name =
        AttendeeName::parse(&request.name).map_err(|e| AppError::Validation(e.to_string()))?;
    let email = Email::parse(&request.email).map_err(|e| AppError::Validation(e.to_string()))?;

    let attendee_id = RegistrationService::new(state.store())
        .register(event_id, name, email)
        .await?;

    Ok((StatusCode::CREATED, Json(RegisterResponse { attendee_id })))
}

/// List an event's attendees, one page at a time.
///
/// GET /events/{event_id}/attendees?query=&pageIndex=
#[tracing::instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<AttendeePage>> {
    let event_id = event_id(path)?;
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let page = params.page_index.map_or(PageIndex::FIRST, PageIndex::new);
    let result = AttendeeQueryService::new(state.store())
        .list(event_id, params.query.as_deref(), page)
        .await?;

    Ok(Json(result))
}
