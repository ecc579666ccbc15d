//! Schema period entity model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A row from the `schema_periods` table: one user's time-bound commitment
/// to a training schema. At most one period per user is active; a partial
/// unique index enforces this.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SchemaPeriod {
    pub id: DbId,
    pub user_id: DbId,
    pub schema_id: DbId,
    pub started_on: NaiveDate,
    pub status_id: StatusId,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
