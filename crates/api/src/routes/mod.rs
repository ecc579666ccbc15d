pub mod academy;
pub mod events;
pub mod health;
pub mod onboarding;
pub mod training;

use axum::routing::put;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /academy/modules                              curriculum overview (GET)
/// /academy/modules/{id}/progress                per-module progress (GET)
/// /academy/modules/{id}/unlock-next             unlock cascade (POST)
/// /academy/lessons/{id}/complete                record completion (POST)
///
/// /users/{user_id}/onboarding                   status (GET, lazily created)
/// /users/{user_id}/onboarding/advance           milestone write (POST)
/// /users/{user_id}/training-profile             frequency config (PUT)
///
/// /training/periods                             start (POST), list (GET)
/// /training/schemas/{id}/status                 derived completion (GET)
/// /training/schemas/{id}/days/complete          record a day (POST)
/// /training/schemas/{id}/complete               explicit completion (POST)
///
/// /events                                       event feed (GET, paged)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/academy", academy::router())
        .nest("/events", events::router())
        .nest("/training", training::router())
        .nest("/users/{user_id}/onboarding", onboarding::router())
        .route(
            "/users/{user_id}/training-profile",
            put(handlers::training::update_profile),
        )
}
