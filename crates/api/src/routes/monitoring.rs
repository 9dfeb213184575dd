//! Route definitions for the monitoring dashboard.
//!
//! Authentication is optional; see [`crate::middleware::auth::CurrentUser`].

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::monitoring;
use crate::state::AppState;

/// Routes mounted at `/monitoring`.
///
/// ```text
/// GET    /schema                              -> get_schema
///
/// /projects/{project}/jobs/{job}/builds/{number}
/// GET    /widgets                             -> list_widgets
/// GET    /configuration                       -> get_configuration
/// PUT    /configuration                       -> update_configuration
/// DELETE /configuration                       -> reset_configuration
/// POST   /configuration/prune                 -> prune_configuration
/// GET    /synced                              -> get_synced
/// GET    /unavailable                         -> get_unavailable
/// GET    /changes                             -> get_changes
/// POST   /step                                -> run_step
/// ```
pub fn router() -> Router<AppState> {
    let build = Router::new()
        .route("/widgets", get(monitoring::list_widgets))
        .route(
            "/configuration",
            get(monitoring::get_configuration)
                .put(monitoring::update_configuration)
                .delete(monitoring::reset_configuration),
        )
        .route("/configuration/prune", post(monitoring::prune_configuration))
        .route("/synced", get(monitoring::get_synced))
        .route("/unavailable", get(monitoring::get_unavailable))
        .route("/changes", get(monitoring::get_changes))
        .route("/step", post(monitoring::run_step));

    Router::new()
        .route("/schema", get(monitoring::get_schema))
        .nest("/projects/{project}/jobs/{job}/builds/{number}", build)
}
