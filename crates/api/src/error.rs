use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prmon_core::CoreError;
use prmon_pipeline::StepError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Renders every failure as `{ "error": .., "code": .. }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The pipeline step failed; `log` holds the build-log lines written so far.
    #[error("{error}")]
    StepFailed { error: StepError, log: Vec<String> },

    /// A path segment or request body that could not be extracted.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

fn internal(msg: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %msg, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::SchemaInvalid(msg) => {
                    (StatusCode::BAD_REQUEST, "SCHEMA_INVALID", msg.clone())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::MissingContext(_) | CoreError::Unauthorized(_) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", core.to_string())
                }
                CoreError::Persistence(msg) => internal(msg),
            },

            AppError::StepFailed { error, log } => {
                let (status, code, message) = match error {
                    StepError::SchemaInvalid(_) => {
                        (StatusCode::BAD_REQUEST, "SCHEMA_INVALID", error.to_string())
                    }
                    StepError::MissingContext(_) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", error.to_string())
                    }
                    StepError::Persistence(msg) => internal(msg),
                };
                let body = json!({
                    "error": message,
                    "code": code,
                    "log": log,
                });
                return (status, axum::Json(body)).into_response();
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
