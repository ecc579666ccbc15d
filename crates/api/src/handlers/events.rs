//! Handlers for the platform event feed.
//!
//! Read-only view over the durable event log written by the
//! `forma-events` persistence service.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use forma_db::models::event::Event;
use forma_db::repositories::EventRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for the event feed.
const DEFAULT_LIMIT: i64 = 50;

/// Upper bound on the page size.
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct EventFeedQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /events -- recent platform events, newest first.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(query): Query<EventFeedQuery>,
) -> AppResult<Json<DataResponse<Vec<Event>>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let events = EventRepo::list_recent(&state.pool, limit, offset).await?;

    Ok(Json(DataResponse { data: events }))
}
