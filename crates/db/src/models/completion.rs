//! Lesson completion fact models.
//!
//! Two tables record the same fact under different historical schemes:
//! `lesson_completions` is the current mechanism; `lesson_progress` is the
//! legacy one. A lesson counts as completed if it appears in either. The
//! engine writes only the new table; legacy rows are read-only here.

use serde::Serialize;
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

/// Legacy progress state value that counts as a completion.
pub const LEGACY_STATE_COMPLETED: &str = "completed";

/// A row from the `lesson_completions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonCompletion {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub score: i32,
    pub time_spent_secs: i32,
    pub completed_at: Timestamp,
}

/// A row from the legacy `lesson_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LegacyLessonProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub lesson_id: DbId,
    pub state: String,
    pub updated_at: Timestamp,
}
