//! Curriculum module entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A row from the `modules` table. Modules are authored by content
/// management; the engine treats them as read-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Module {
    pub id: DbId,
    pub title: String,
    pub sort_order: i32,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a module.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModule {
    pub title: String,
    pub sort_order: i32,
    /// Defaults to 1 (Draft) if omitted.
    pub status_id: Option<StatusId>,
}
