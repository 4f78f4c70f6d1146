use thiserror::Error;

use crate::analyzer::title::TitleValidationError;

/// Unified error type for conventional-gate operations
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Recommendation unavailable: {0}")]
    RecommendationUnavailable(String),

    #[error(
        "No commit messages compliant with conventional commits found. \
         Add at least one commit such as \"fix: correct the login redirect\""
    )]
    NoCompliantCommits,

    #[error(transparent)]
    Title(#[from] TitleValidationError),

    #[error("Output error: {0}")]
    Output(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in conventional-gate
pub type Result<T> = std::result::Result<T, GateError>;

impl GateError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GateError::Config(msg.into())
    }

    /// Create a version format error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        GateError::InvalidVersionFormat(msg.into())
    }

    /// Create an error for a collaborator that returned no usable data
    pub fn unavailable(msg: impl Into<String>) -> Self {
        GateError::RecommendationUnavailable(msg.into())
    }

    /// Create an output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        GateError::Output(msg.into())
    }
}
