#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration text failed structural validation.
    #[error("Invalid configuration: {0}")]
    SchemaInvalid(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A write was attempted without a build or user to scope it to.
    #[error("Missing required context: {0}")]
    MissingContext(&'static str),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
