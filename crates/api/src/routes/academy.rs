//! Route definitions for the `/academy` resource group.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::academy;
use crate::state::AppState;

/// Routes mounted at `/academy`.
///
/// ```text
/// GET    /modules                      -> list_modules
/// GET    /modules/{id}/progress        -> module_progress
/// POST   /modules/{id}/unlock-next     -> unlock_next
/// POST   /lessons/{id}/complete        -> complete_lesson
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/modules", get(academy::list_modules))
        .route("/modules/{id}/progress", get(academy::module_progress))
        .route("/modules/{id}/unlock-next", post(academy::unlock_next))
        .route("/lessons/{id}/complete", post(academy::complete_lesson))
}
