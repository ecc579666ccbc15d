//! User entity model.
//!
//! Users are owned by the account subsystem; this engine only reads them
//! to validate foreign references.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user (test fixtures and import tooling).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
}
