//! Common error types for medadmin

use thiserror::Error;

/// Common result type for medadmin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across medadmin crates
///
/// The filtering core itself is total; these errors only arise at the
/// boundaries (query-string binding, fixture loading, configuration).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fixture or payload JSON could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be decoded
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
