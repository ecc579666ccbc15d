//! Schema progress counter model.

use serde::Serialize;
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

/// A row from the `schema_progress` table: running counters for one
/// (user, schema) pair. Weeks completed is never stored; it is derived
/// from `days_completed` and the user's training frequency on read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchemaProgress {
    pub id: DbId,
    pub user_id: DbId,
    pub schema_id: DbId,
    pub days_completed: i32,
    pub current_day: i32,
    pub started_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}
