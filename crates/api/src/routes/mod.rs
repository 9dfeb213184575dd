pub mod health;
pub mod monitoring;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /monitoring/schema                                          configuration schema
/// /monitoring/projects/{project}/jobs/{job}/builds/{number}/  per-build dashboard
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/monitoring", monitoring::router())
}
