// Error types for the warden application.
// Covers identity server API errors, cache errors, and general application errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WardenError {
    #[error("Identity server API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Missing WARDEN_SERVER_URL environment variable")]
    MissingServerUrl,

    #[error("Missing WARDEN_TOKEN environment variable")]
    MissingToken,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WardenError>;
