//! Route definitions for user onboarding.
//!
//! Mounted at `/users/{user_id}/onboarding` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Onboarding routes.
///
/// ```text
/// GET    /           -> get_status (get or create)
/// POST   /advance    -> advance (milestone write)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(onboarding::get_status))
        .route("/advance", post(onboarding::advance))
}
