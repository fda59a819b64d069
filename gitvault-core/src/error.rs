//! Error types for GitVault

use thiserror::Error;

/// Result type alias for GitVault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for GitVault operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration or secrets error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backup root could not be created
    #[error("failed to create backup directory {dir}: {source}")]
    BackupDir {
        dir: String,
        #[source]
        source: std::io::Error,
    },

    /// Listing the remote repositories failed
    #[error("failed to fetch repositories from GitHub: {0}")]
    Listing(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A git subprocess failed
    #[error("git {operation} failed: {message}")]
    Git {
        operation: &'static str,
        message: String,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap any lister error as a listing failure
    pub fn listing(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Listing(Box::new(err))
    }
}
