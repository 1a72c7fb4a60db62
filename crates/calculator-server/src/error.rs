//! Error types for the calculator server.

use thiserror::Error;

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors that can occur while configuring or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logger installation error
    #[error("Logging error: {0}")]
    Logging(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Create a new configuration error.
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<log::SetLoggerError> for ServerError {
    fn from(err: log::SetLoggerError) -> Self {
        ServerError::Logging(err.to_string())
    }
}
