//! Handlers for the monitoring dashboard of one build.
//!
//! The build is identified by path segments; the viewing user comes from
//! the optional bearer token ([`CurrentUser`]).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use prmon_core::configuration;
use prmon_core::{BuildKind, BuildRef};
use prmon_pipeline::{run_monitoring_step, BuildLog, StepContext};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::CurrentUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Path segments identifying a build.
#[derive(Debug, Deserialize)]
pub struct BuildPath {
    pub project: String,
    pub job: String,
    pub number: i64,
}

impl BuildPath {
    fn build(self) -> BuildRef {
        BuildRef::branch(self.project, self.job, self.number)
    }
}

/// Body of `PUT .../configuration`.
#[derive(Debug, Deserialize)]
pub struct UpdateConfigurationRequest {
    /// Configuration text as typed into the editor.
    pub config: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRequestInfo {
    pub id: String,
    pub source_branch: String,
    pub target_branch: String,
}

/// Body of `POST .../step`.
#[derive(Debug, Deserialize)]
pub struct StepRequest {
    #[serde(default = "empty_portlets")]
    pub portlets: String,
    /// Set when the host classified the build as part of a change request.
    #[serde(default)]
    pub change_request: Option<ChangeRequestInfo>,
}

fn empty_portlets() -> String {
    "[]".to_string()
}

#[derive(Debug, Serialize)]
pub struct SyncedResponse {
    pub synced: bool,
}

#[derive(Debug, Serialize)]
pub struct UnavailableResponse {
    pub unavailable: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChangesResponse {
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub outcome: prmon_pipeline::StepOutcome,
    pub log: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/monitoring/schema
pub async fn get_schema() -> impl IntoResponse {
    Json(DataResponse {
        data: configuration::schema(),
    })
}

/// GET .../widgets
///
/// Available portlets grouped by provider.
pub async fn list_widgets(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let groups = state.dashboard.available_widget_groups(&build);
    Ok(Json(DataResponse { data: groups }))
}

/// GET .../configuration
///
/// The configuration shown for the build. Never fails: store problems are
/// reported in `persistence_error` alongside the document.
pub async fn get_configuration(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let resolved = state
        .dashboard
        .effective_configuration(&build, user.id())
        .await;
    Ok(Json(DataResponse { data: resolved }))
}

/// PUT .../configuration
pub async fn update_configuration(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    user: CurrentUser,
    ApiJson(input): ApiJson<UpdateConfigurationRequest>,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let document = state
        .dashboard
        .update_configuration(&build, user.id(), &input.config)
        .await?;
    Ok(Json(DataResponse { data: document }))
}

/// DELETE .../configuration
///
/// Resets the project to the user's default and returns the configuration
/// now in effect.
pub async fn reset_configuration(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    state.dashboard.reset_to_default(&build, user.id()).await?;
    let resolved = state
        .dashboard
        .effective_configuration(&build, user.id())
        .await;
    Ok(Json(DataResponse { data: resolved }))
}

/// POST .../configuration/prune
pub async fn prune_configuration(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let outcome = state
        .dashboard
        .prune_stored_configuration(&build, user.id())
        .await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET .../synced
pub async fn get_synced(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let synced = state.dashboard.is_synced(&build, user.id()).await?;
    Ok(Json(DataResponse {
        data: SyncedResponse { synced },
    }))
}

/// GET .../unavailable
pub async fn get_unavailable(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    user: CurrentUser,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let unavailable = state
        .dashboard
        .unavailable_widget_ids(&build, user.id())
        .await;
    Ok(Json(DataResponse {
        data: UnavailableResponse { unavailable },
    }))
}

/// GET .../changes
pub async fn get_changes(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
) -> AppResult<impl IntoResponse> {
    let build = path.build();
    let changed = state.dashboard.has_changes(&build).await?;
    Ok(Json(DataResponse {
        data: ChangesResponse { changed },
    }))
}

/// POST .../step
///
/// Entry point of the `monitoring` pipeline step. A failure carries the
/// build-log lines so the pipeline can print them before failing the build.
pub async fn run_step(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<BuildPath>,
    ApiJson(input): ApiJson<StepRequest>,
) -> AppResult<impl IntoResponse> {
    let mut build = path.build();
    if let Some(cr) = input.change_request {
        build = build.with_kind(BuildKind::ChangeRequest {
            id: cr.id,
            source_branch: cr.source_branch,
            target_branch: cr.target_branch,
        });
    }

    let ctx = StepContext {
        build: &build,
        registry: state.dashboard.registry(),
        builds: state.dashboard.build_store().as_ref(),
    };
    let mut log = BuildLog::new();

    match run_monitoring_step(&input.portlets, &ctx, &mut log).await {
        Ok(outcome) => Ok(Json(DataResponse {
            data: StepResponse {
                outcome,
                log: log.into_lines(),
            },
        })),
        Err(error) => Err(AppError::StepFailed {
            error,
            log: log.into_lines(),
        }),
    }
}
