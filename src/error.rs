//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Each pipeline stage fails with the variant naming what it detected; nothing is
//! retried since every stage is deterministic.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Degenerate image: {height}x{width} has no area at the requested extent")]
    DegenerateImage { height: usize, width: usize },

    #[error("Scaled content {rows}x{cols} does not fit a {side}x{side} canvas")]
    Oversize { rows: usize, cols: usize, side: usize },

    #[error("Shape mismatch: expected {expected}, got {got}")]
    Shape { expected: String, got: String },

    #[error("Score vector must have {expected} entries, got {got}")]
    Scores { expected: usize, got: usize },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model error: {0}")]
    Model(#[from] crate::io::ModelError),

    #[cfg(feature = "decode")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    pub(crate) fn shape(expected: impl std::fmt::Display, got: impl std::fmt::Debug) -> Self {
        Error::Shape {
            expected: expected.to_string(),
            got: format!("{:?}", got),
        }
    }
}
