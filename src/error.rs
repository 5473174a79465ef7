//! Error types for the prsync CLI.
//!
//! Uses thiserror for derive macros. Every error is fatal to the run: there is
//! no retry or partial-failure recovery, each variant only decides the exit code.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for prsync operations.
///
/// Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum PrsyncError {
    /// User provided invalid arguments or a local filesystem operation failed.
    #[error("{0}")]
    UserError(String),

    /// The PR-metadata service responded with a non-200 status.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// The PR-metadata service could not be reached at all.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Git operation failed (non-zero exit code).
    #[error("Git operation failed: {0}")]
    GitError(String),
}

impl PrsyncError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PrsyncError::UserError(_) => exit_codes::USER_ERROR,
            PrsyncError::ApiError(_) | PrsyncError::Http(_) => exit_codes::API_FAILURE,
            PrsyncError::GitError(_) => exit_codes::GIT_FAILURE,
        }
    }
}

impl From<std::io::Error> for PrsyncError {
    fn from(err: std::io::Error) -> Self {
        PrsyncError::UserError(err.to_string())
    }
}

/// Result type alias for prsync operations.
pub type Result<T> = std::result::Result<T, PrsyncError>;
