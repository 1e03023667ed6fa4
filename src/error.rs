//! Error types for kb
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, validation failure, unknown id)
//! - 4: Operation failed (remote store error, network failure)

use thiserror::Error;

/// Exit codes for the kb CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for kb operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // Operation failures (exit code 4)
    #[error("Remote store rejected the request: {0}")]
    Conflict(String),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::Validation(_)
            | Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::NotFound(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::Conflict(_)
            | Error::Remote(_)
            | Error::Http(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for kb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: None,
        }
    }
}
