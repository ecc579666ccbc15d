//! Module gate evaluation.
//!
//! Decides whether a user has completed a module and, if so, records the
//! completion fact and unlocks the next module exactly once. Completion is
//! judged against the module's published lessons only; completion facts are
//! reconciled from both historical recording schemes at read time.

use std::collections::HashSet;

use sqlx::PgPool;

use forma_core::types::DbId;
use forma_db::models::module::Module;
use forma_db::repositories::{LessonRepo, ModuleProgressRepo, ModuleRepo};
use forma_events::{EventBus, PlatformEvent};

/// Result of one gate evaluation.
#[derive(Debug)]
pub struct GateOutcome {
    /// Every published lesson of the module is completed.
    pub completed: bool,
    /// This evaluation inserted the module completion fact.
    pub newly_completed: bool,
    /// The module after this one in curriculum order, if any.
    pub next_module: Option<Module>,
    /// This evaluation inserted the unlock for `next_module`.
    pub newly_unlocked: bool,
}

/// Evaluate the gate for one (user, module) pair.
///
/// Not-complete is the expected steady state while a user is mid-module and
/// performs no writes. When complete, the completion fact and the unlock of
/// the next module are each inserted at most once; losing a race to a
/// concurrent evaluation is treated as already-done, not as an error.
pub async fn evaluate(
    pool: &PgPool,
    user_id: DbId,
    module: &Module,
) -> Result<GateOutcome, sqlx::Error> {
    let published = LessonRepo::list_published_by_module(pool, module.id).await?;
    let completed_ids: HashSet<DbId> =
        ModuleProgressRepo::completed_lesson_ids(pool, user_id, module.id)
            .await?
            .into_iter()
            .collect();

    // A module with no published lessons is not vacuously completable.
    let completed = !published.is_empty()
        && published.iter().all(|lesson| completed_ids.contains(&lesson.id));

    if !completed {
        return Ok(GateOutcome {
            completed: false,
            newly_completed: false,
            next_module: None,
            newly_unlocked: false,
        });
    }

    let total = published.len() as i32;
    let newly_completed =
        ModuleProgressRepo::insert_completion_if_absent(pool, user_id, module.id, total, total)
            .await?;

    if newly_completed {
        tracing::info!(user_id, module_id = module.id, "Module completed");
    }

    // Next module by sort order regardless of status: unlocking makes a
    // module reachable, publishing it is content management's concern.
    let next_module = ModuleRepo::find_next_after(pool, module.sort_order).await?;

    let newly_unlocked = match &next_module {
        Some(next) => {
            let inserted =
                ModuleProgressRepo::insert_unlock_if_absent(pool, user_id, next.id).await?;
            if inserted {
                tracing::info!(user_id, module_id = next.id, "Module unlocked");
            }
            inserted
        }
        None => false,
    };

    Ok(GateOutcome {
        completed: true,
        newly_completed,
        next_module,
        newly_unlocked,
    })
}

/// Publish the progression events for a gate outcome.
///
/// Only transitions publish: replays and lost races stay silent so the
/// event log mirrors the insert-once facts.
pub fn publish_outcome(bus: &EventBus, user_id: DbId, module: &Module, outcome: &GateOutcome) {
    if outcome.newly_completed {
        bus.publish(
            PlatformEvent::new("module.completed")
                .with_source("module", module.id)
                .with_actor(user_id),
        );
    }
    if outcome.newly_unlocked {
        if let Some(next) = &outcome.next_module {
            bus.publish(
                PlatformEvent::new("module.unlocked")
                    .with_source("module", next.id)
                    .with_actor(user_id)
                    .with_payload(serde_json::json!({ "unlocked_after": module.id })),
            );
        }
    }
}
