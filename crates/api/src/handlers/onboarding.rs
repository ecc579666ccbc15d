//! Handlers for the onboarding state machine.
//!
//! The step is derived from the milestone set and the caller-supplied
//! capability flags on every read; it is never trusted as stored truth.
//! The onboarding record is created lazily on first access.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use forma_core::error::CoreError;
use forma_core::onboarding::{self, Capabilities, MilestoneSet};
use forma_core::types::DbId;
use forma_db::repositories::{OnboardingRepo, UserRepo};
use forma_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Capability flags as request parameters. The entitlement collaborator
/// resolves the user's package; this engine only consumes the booleans.
/// Absent flags default to full access.
#[derive(Debug, Default, Deserialize)]
pub struct CapabilityParams {
    pub has_training_access: Option<bool>,
    pub has_nutrition_access: Option<bool>,
}

impl CapabilityParams {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            has_training_access: self.has_training_access.unwrap_or(true),
            has_nutrition_access: self.has_nutrition_access.unwrap_or(true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatusResponse {
    pub step: i16,
    pub milestones: MilestoneSet,
    pub completed: bool,
    pub guidance: &'static str,
}

fn status_response(
    milestones: MilestoneSet,
    stored_completed: bool,
    caps: Capabilities,
) -> OnboardingStatusResponse {
    // The stored flag is sticky; the derived value covers users whose
    // milestones already satisfy the sequence but who never hit the
    // advance path after the transition.
    let completed = stored_completed || onboarding::is_complete(&milestones, caps);
    let step = if completed {
        onboarding::FINAL_STEP
    } else {
        onboarding::derive_step(&milestones, caps)
    };
    OnboardingStatusResponse {
        step,
        milestones,
        completed,
        guidance: onboarding::guidance(step, completed),
    }
}

// ---------------------------------------------------------------------------
// GET /users/{user_id}/onboarding
// ---------------------------------------------------------------------------

/// Get the user's onboarding status, creating a default record on first
/// access.
pub async fn get_status(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(params): Query<CapabilityParams>,
) -> AppResult<Json<DataResponse<OnboardingStatusResponse>>> {
    require_user(&state, user_id).await?;

    let record = OnboardingRepo::get_or_create(&state.pool, user_id).await?;

    tracing::debug!(user_id, "Fetched onboarding status");

    Ok(Json(DataResponse {
        data: status_response(record.milestones(), record.completed, params.capabilities()),
    }))
}

// ---------------------------------------------------------------------------
// POST /users/{user_id}/onboarding/advance
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub milestone: String,
    pub value: bool,
    #[serde(flatten)]
    pub flags: CapabilityParams,
}

/// Write one named milestone and recompute the step as far as the
/// milestone set allows in a single call.
///
/// Milestones are sticky, so the reported step never regresses, and a
/// retried advance is a no-op. When every required milestone is satisfied
/// the completed flag is set once.
pub async fn advance(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(req): Json<AdvanceRequest>,
) -> AppResult<Json<DataResponse<OnboardingStatusResponse>>> {
    let column = onboarding::milestone_column(&req.milestone).map_err(AppError::Core)?;

    require_user(&state, user_id).await?;

    // First-touch semantics: the advance path also creates the record.
    OnboardingRepo::get_or_create(&state.pool, user_id).await?;

    let record = OnboardingRepo::set_milestone(&state.pool, user_id, column, req.value).await?;

    let caps = req.flags.capabilities();
    if onboarding::is_complete(&record.milestones(), caps) {
        let transitioned = OnboardingRepo::mark_completed(&state.pool, user_id).await?;
        if transitioned {
            tracing::info!(user_id, "Onboarding completed");
            state
                .event_bus
                .publish(PlatformEvent::new("onboarding.completed").with_actor(user_id));
        }
    }

    tracing::info!(user_id, milestone = %req.milestone, value = req.value, "Onboarding milestone updated");

    let completed = record.completed || onboarding::is_complete(&record.milestones(), caps);
    Ok(Json(DataResponse {
        data: status_response(record.milestones(), completed, caps),
    }))
}

/// Fail with 404 unless the user exists.
async fn require_user(state: &AppState, id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(())
}
