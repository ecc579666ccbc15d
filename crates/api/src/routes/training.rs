//! Route definitions for the `/training` resource group.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::training;
use crate::state::AppState;

/// Routes mounted at `/training`.
///
/// ```text
/// POST   /periods                            -> start_period
/// GET    /periods                            -> list_periods
/// GET    /schemas/{schema_id}/status         -> schema_status
/// POST   /schemas/{schema_id}/days/complete  -> record_day
/// POST   /schemas/{schema_id}/complete       -> complete_schema
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/periods",
            get(training::list_periods).post(training::start_period),
        )
        .route("/schemas/{schema_id}/status", get(training::schema_status))
        .route(
            "/schemas/{schema_id}/days/complete",
            post(training::record_day),
        )
        .route(
            "/schemas/{schema_id}/complete",
            post(training::complete_schema),
        )
}
