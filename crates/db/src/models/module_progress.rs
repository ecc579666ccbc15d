//! Derived module progression fact models.
//!
//! Both tables are written only by the module gate evaluator, never
//! hand-authored, and rows are never revoked once inserted.

use serde::Serialize;
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

/// A row from the `module_completions` table: the user had finished every
/// published lesson of the module at evaluation time, with a snapshot of
/// the lesson counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModuleCompletion {
    pub id: DbId,
    pub user_id: DbId,
    pub module_id: DbId,
    pub total_lessons: i32,
    pub completed_lessons: i32,
    pub completed_at: Timestamp,
}

/// A row from the `module_unlocks` table: the module became reachable for
/// the user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModuleUnlock {
    pub id: DbId,
    pub user_id: DbId,
    pub module_id: DbId,
    pub unlocked_at: Timestamp,
}
