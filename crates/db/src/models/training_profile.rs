//! Training profile entity model.

use serde::Serialize;
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

/// A row from the `training_profiles` table: per-user training
/// configuration. Absence of a row means the default frequency applies.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub training_frequency: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
