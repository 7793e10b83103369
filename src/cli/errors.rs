use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Conflicting arguments: {first} and {second}")]
    Conflict { first: String, second: String },

    #[error(transparent)]
    Pipeline(#[from] digitprep::Error),

    #[error("Model error: {0}")]
    Model(#[from] digitprep::ModelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
