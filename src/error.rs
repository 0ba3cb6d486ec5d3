//! Error types for the Bazaar marketplace client.

use thiserror::Error;

/// Local store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse agents file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Failed to serialize agents file: {0}")]
    Serialize(String),
}

/// Errors surfaced by commands.
///
/// `Usage` and `AgentNotFound` are raised before any network call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Usage(String),

    #[error("Agent not found: {0}. Run `bazaar agent list` to see available agents.")]
    AgentNotFound(String),

    #[error("Not logged in: no session token configured (set session.token or BAZAAR_SESSION__TOKEN)")]
    NotLoggedIn,

    #[error("Marketplace authentication failed: {0}")]
    RemoteAuthFailed(String),

    #[error("Marketplace request failed: {0}")]
    RemoteRequestFailed(String),

    /// The server answered with a non-success status; `body` is its response text.
    #[error("Marketplace request failed with status {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Marketplace error: {0}")]
    RemoteError(String),

    #[error("Marketplace returned no API key for agent {0}; nothing was saved")]
    MissingApiKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// True for errors detected locally from user input.
    pub fn is_usage(&self) -> bool {
        matches!(self, ApiError::Usage(_) | ApiError::AgentNotFound(_))
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
