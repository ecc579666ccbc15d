//! Handlers for the `/academy` resource group: lesson completion recording,
//! module progress, and the module unlock cascade.

use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use forma_core::academy::{self, CompletionInput};
use forma_core::error::{validate_input, CoreError};
use forma_core::types::DbId;
use forma_db::models::lesson::Lesson;
use forma_db::models::module::Module;
use forma_db::repositories::{
    LessonCompletionRepo, LessonRepo, ModuleProgressRepo, ModuleRepo, UserRepo,
};
use forma_events::PlatformEvent;

use crate::engine::module_gate;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameter carrying the acting user.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: DbId,
}

/// Resolve a module or fail with 404.
async fn require_module(state: &AppState, id: DbId) -> AppResult<Module> {
    ModuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Module",
            id,
        }))
}

/// Resolve a lesson or fail with 404.
async fn require_lesson(state: &AppState, id: DbId) -> AppResult<Lesson> {
    LessonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id,
        }))
}

/// Fail with 404 unless the user exists.
async fn require_user(state: &AppState, id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /academy/lessons/{lesson_id}/complete
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CompleteLessonRequest {
    pub user_id: DbId,
    #[serde(flatten)]
    pub input: CompletionInput,
}

/// Record a lesson completion and run the module gate for its parent
/// module in the same logical operation.
///
/// The write is an upsert keyed by (user, lesson): replays and
/// multi-device submissions overwrite score/time/timestamp instead of
/// creating duplicates, so clients may retry blindly.
pub async fn complete_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<DbId>,
    Json(req): Json<CompleteLessonRequest>,
) -> AppResult<impl IntoResponse> {
    validate_input(&req.input)?;

    let lesson = require_lesson(&state, lesson_id).await?;
    require_user(&state, req.user_id).await?;

    let score = academy::clamp_score(req.input.score);
    let time_spent = req.input.time_spent_seconds.unwrap_or(0);

    let completion =
        LessonCompletionRepo::upsert(&state.pool, req.user_id, lesson.id, score, time_spent)
            .await?;

    tracing::info!(
        user_id = req.user_id,
        lesson_id = lesson.id,
        score,
        "Lesson completion recorded"
    );

    state.event_bus.publish(
        PlatformEvent::new("lesson.completed")
            .with_source("lesson", lesson.id)
            .with_actor(req.user_id)
            .with_payload(serde_json::json!({ "score": score })),
    );

    // Gate evaluation is part of the same logical operation.
    let module = require_module(&state, lesson.module_id).await?;
    let outcome = module_gate::evaluate(&state.pool, req.user_id, &module).await?;
    module_gate::publish_outcome(&state.event_bus, req.user_id, &module, &outcome);

    Ok(Json(DataResponse { data: completion }))
}

// ---------------------------------------------------------------------------
// GET /academy/modules/{module_id}/progress
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LessonProgressEntry {
    pub id: DbId,
    pub title: String,
    pub sort_order: i32,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct ModuleProgressResponse {
    pub lessons: Vec<LessonProgressEntry>,
    pub completed: bool,
    pub previous_module_id: Option<DbId>,
    pub next_module_id: Option<DbId>,
}

/// Read a user's progress through one module. Pure read: never writes
/// completion or unlock facts.
pub async fn module_progress(
    State(state): State<AppState>,
    Path(module_id): Path<DbId>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<DataResponse<ModuleProgressResponse>>> {
    let module = require_module(&state, module_id).await?;
    require_user(&state, query.user_id).await?;

    let published = LessonRepo::list_published_by_module(&state.pool, module.id).await?;
    let completed_ids: HashSet<DbId> =
        ModuleProgressRepo::completed_lesson_ids(&state.pool, query.user_id, module.id)
            .await?
            .into_iter()
            .collect();

    let lessons: Vec<LessonProgressEntry> = published
        .into_iter()
        .map(|lesson| LessonProgressEntry {
            completed: completed_ids.contains(&lesson.id),
            id: lesson.id,
            title: lesson.title,
            sort_order: lesson.sort_order,
        })
        .collect();

    let completed = !lessons.is_empty() && lessons.iter().all(|l| l.completed);

    let previous_module_id = ModuleRepo::find_previous_before(&state.pool, module.sort_order)
        .await?
        .map(|m| m.id);
    let next_module_id = ModuleRepo::find_next_after(&state.pool, module.sort_order)
        .await?
        .map(|m| m.id);

    Ok(Json(DataResponse {
        data: ModuleProgressResponse {
            lessons,
            completed,
            previous_module_id,
            next_module_id,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /academy/modules/{module_id}/unlock-next
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UnlockNextRequest {
    pub user_id: DbId,
}

/// Why an unlock call did not insert a new unlock row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockReason {
    NoNextModule,
    AlreadyUnlocked,
    ModuleNotCompleted,
}

#[derive(Debug, Serialize)]
pub struct UnlockNextResponse {
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnlockReason>,
    pub next_module_id: Option<DbId>,
}

/// Run the module gate and report the unlock result.
///
/// Repeated or concurrent calls for an eligible module all succeed: one
/// inserts the unlock, the rest report `already_unlocked`. An incomplete
/// module is not an error either, just `module_not_completed`.
pub async fn unlock_next(
    State(state): State<AppState>,
    Path(module_id): Path<DbId>,
    Json(req): Json<UnlockNextRequest>,
) -> AppResult<Json<DataResponse<UnlockNextResponse>>> {
    let module = require_module(&state, module_id).await?;
    require_user(&state, req.user_id).await?;

    let outcome = module_gate::evaluate(&state.pool, req.user_id, &module).await?;
    module_gate::publish_outcome(&state.event_bus, req.user_id, &module, &outcome);

    let response = if !outcome.completed {
        UnlockNextResponse {
            unlocked: false,
            reason: Some(UnlockReason::ModuleNotCompleted),
            next_module_id: None,
        }
    } else {
        match &outcome.next_module {
            None => UnlockNextResponse {
                unlocked: false,
                reason: Some(UnlockReason::NoNextModule),
                next_module_id: None,
            },
            Some(next) if outcome.newly_unlocked => UnlockNextResponse {
                unlocked: true,
                reason: None,
                next_module_id: Some(next.id),
            },
            Some(next) => UnlockNextResponse {
                unlocked: true,
                reason: Some(UnlockReason::AlreadyUnlocked),
                next_module_id: Some(next.id),
            },
        }
    };

    Ok(Json(DataResponse { data: response }))
}

// ---------------------------------------------------------------------------
// GET /academy/modules
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ModuleOverviewEntry {
    pub id: DbId,
    pub title: String,
    pub sort_order: i32,
    pub unlocked: bool,
    pub completed: bool,
}

/// List the published curriculum with per-module unlock and completion
/// state for a user. The first module is implicitly unlocked.
pub async fn list_modules(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<DataResponse<Vec<ModuleOverviewEntry>>>> {
    require_user(&state, query.user_id).await?;

    let modules = ModuleRepo::list_published(&state.pool).await?;
    let unlocked: HashSet<DbId> =
        ModuleProgressRepo::unlocked_module_ids(&state.pool, query.user_id)
            .await?
            .into_iter()
            .collect();
    let completed: HashSet<DbId> =
        ModuleProgressRepo::completed_module_ids(&state.pool, query.user_id)
            .await?
            .into_iter()
            .collect();

    let entries: Vec<ModuleOverviewEntry> = modules
        .into_iter()
        .enumerate()
        .map(|(index, module)| ModuleOverviewEntry {
            unlocked: index == 0 || unlocked.contains(&module.id),
            completed: completed.contains(&module.id),
            id: module.id,
            title: module.title,
            sort_order: module.sort_order,
        })
        .collect();

    Ok(Json(DataResponse { data: entries }))
}
