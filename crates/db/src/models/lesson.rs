//! Lesson entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A row from the `lessons` table. Each lesson belongs to exactly one
/// module; draft lessons are not part of the live curriculum.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub module_id: DbId,
    pub title: String,
    pub sort_order: i32,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lesson.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLesson {
    pub module_id: DbId,
    pub title: String,
    pub sort_order: i32,
    /// Defaults to 1 (Draft) if omitted.
    pub status_id: Option<StatusId>,
}
