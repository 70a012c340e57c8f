//! Error types for the inference pipeline

use thiserror::Error;

/// Errors that can occur while answering a prediction request.
///
/// Every variant is a deterministic function of the request and the loaded
/// artifacts, so none of them is retryable.
#[derive(Error, Debug)]
pub enum PredictError {
    /// Malformed date/time, non-positive duration, negative stop count
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Categorical value absent from the frozen vocabulary
    #[error("unknown category {value:?} for field {field:?}")]
    UnknownCategory { field: String, value: String },

    /// Assembled vector disagrees with the model's expected width.
    /// Unreachable with consistent artifacts; surfaced, never coerced.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl PredictError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn unknown_category<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self::UnknownCategory {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Errors that can occur while loading the frozen artifacts.
///
/// All of these are fatal at startup: the process must not begin serving
/// with a partial or inconsistent artifact set.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact validation failed: {0}")]
    ValidationFailed(String),

    #[error("unsupported artifact version: {0}")]
    UnsupportedVersion(i32),

    #[error("feature width mismatch: transform produces {transform} columns, model expects {model}")]
    WidthMismatch { transform: usize, model: usize },
}

/// Result type for artifact loading operations
pub type ArtifactResult<T> = std::result::Result<T, ArtifactError>;
