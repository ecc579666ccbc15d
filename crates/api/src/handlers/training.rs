//! Handlers for the `/training` resource group: schema periods, progress
//! counters, and the derived completion status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use forma_core::error::{validate_input, CoreError};
use forma_core::schedule::{self, CompletionStatus, ProfileInput};
use forma_core::types::DbId;
use forma_db::models::schema::TrainingSchema;
use forma_db::models::schema_period::SchemaPeriod;
use forma_db::models::schema_progress::SchemaProgress;
use forma_db::models::training_profile::TrainingProfile;
use forma_db::repositories::{
    SchemaPeriodRepo, SchemaProgressRepo, SchemaRepo, TrainingProfileRepo, UserRepo,
};
use forma_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameter carrying the acting user.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: DbId,
}

/// Body parameter carrying the acting user.
#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub user_id: DbId,
}

/// Fail with 404 unless the user exists.
async fn require_user(state: &AppState, id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(())
}

/// Resolve a schema or fail with 404.
async fn require_schema(state: &AppState, id: DbId) -> AppResult<TrainingSchema> {
    SchemaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Schema",
            id,
        }))
}

// ---------------------------------------------------------------------------
// POST /training/periods
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StartPeriodRequest {
    pub user_id: DbId,
    pub schema_id: DbId,
    pub started_on: NaiveDate,
}

/// Open a new active period, closing any prior active one. Exactly one
/// active period per user is enforced by the store, not by this handler.
pub async fn start_period(
    State(state): State<AppState>,
    Json(req): Json<StartPeriodRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SchemaPeriod>>)> {
    require_user(&state, req.user_id).await?;
    let schema = require_schema(&state, req.schema_id).await?;

    let period =
        SchemaPeriodRepo::start(&state.pool, req.user_id, schema.id, req.started_on).await?;

    tracing::info!(
        user_id = req.user_id,
        schema_id = schema.id,
        "Training period started"
    );

    state.event_bus.publish(
        PlatformEvent::new("schema.period_started")
            .with_source("schema", schema.id)
            .with_actor(req.user_id),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: period })))
}

// ---------------------------------------------------------------------------
// GET /training/periods
// ---------------------------------------------------------------------------

/// List a user's periods, newest first.
pub async fn list_periods(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<DataResponse<Vec<SchemaPeriod>>>> {
    require_user(&state, query.user_id).await?;
    let periods = SchemaPeriodRepo::list_for_user(&state.pool, query.user_id).await?;
    Ok(Json(DataResponse { data: periods }))
}

// ---------------------------------------------------------------------------
// GET /training/schemas/{schema_id}/status
// ---------------------------------------------------------------------------

/// Report the derived completion status for one (user, schema) pair.
///
/// Weeks completed is recomputed from the day counter and the user's
/// training frequency on every read; an explicit completion record pins it
/// to the program threshold. A missing counter row reads as zero progress.
pub async fn schema_status(
    State(state): State<AppState>,
    Path(schema_id): Path<DbId>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<DataResponse<CompletionStatus>>> {
    require_user(&state, query.user_id).await?;
    let schema = require_schema(&state, schema_id).await?;

    let progress = SchemaProgressRepo::find(&state.pool, query.user_id, schema.id).await?;
    let (days_completed, completed_at) = match &progress {
        Some(p) => (p.days_completed, p.completed_at),
        None => (0, None),
    };

    let frequency = TrainingProfileRepo::find(&state.pool, query.user_id)
        .await?
        .map(|p| p.training_frequency);

    let status = schedule::completion_status(days_completed, frequency, completed_at);

    Ok(Json(DataResponse { data: status }))
}

// ---------------------------------------------------------------------------
// POST /training/schemas/{schema_id}/days/complete
// ---------------------------------------------------------------------------

/// Record one completed training day for the user on this schema.
pub async fn record_day(
    State(state): State<AppState>,
    Path(schema_id): Path<DbId>,
    Json(req): Json<UserBody>,
) -> AppResult<Json<DataResponse<SchemaProgress>>> {
    require_user(&state, req.user_id).await?;
    let schema = require_schema(&state, schema_id).await?;

    let progress = SchemaProgressRepo::record_day(&state.pool, req.user_id, schema.id).await?;

    tracing::info!(
        user_id = req.user_id,
        schema_id = schema.id,
        days_completed = progress.days_completed,
        "Training day recorded"
    );

    Ok(Json(DataResponse { data: progress }))
}

// ---------------------------------------------------------------------------
// POST /training/schemas/{schema_id}/complete
// ---------------------------------------------------------------------------

/// Record an explicit completion event for the user on this schema.
/// Idempotent: repeats keep the first completion timestamp.
pub async fn complete_schema(
    State(state): State<AppState>,
    Path(schema_id): Path<DbId>,
    Json(req): Json<UserBody>,
) -> AppResult<Json<DataResponse<SchemaProgress>>> {
    require_user(&state, req.user_id).await?;
    let schema = require_schema(&state, schema_id).await?;

    let already_completed = SchemaProgressRepo::find(&state.pool, req.user_id, schema.id)
        .await?
        .map(|p| p.completed_at.is_some())
        .unwrap_or(false);

    let progress = SchemaProgressRepo::mark_completed(&state.pool, req.user_id, schema.id).await?;

    if !already_completed {
        tracing::info!(
            user_id = req.user_id,
            schema_id = schema.id,
            "Schema completed"
        );
        state.event_bus.publish(
            PlatformEvent::new("schema.completed")
                .with_source("schema", schema.id)
                .with_actor(req.user_id),
        );
    }

    Ok(Json(DataResponse { data: progress }))
}

// ---------------------------------------------------------------------------
// PUT /users/{user_id}/training-profile
// ---------------------------------------------------------------------------

/// Set the user's weekly training frequency.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<ProfileInput>,
) -> AppResult<Json<DataResponse<TrainingProfile>>> {
    validate_input(&input)?;
    require_user(&state, user_id).await?;

    let profile =
        TrainingProfileRepo::upsert(&state.pool, user_id, input.training_frequency).await?;

    tracing::info!(
        user_id,
        training_frequency = input.training_frequency,
        "Training profile updated"
    );

    Ok(Json(DataResponse { data: profile }))
}
