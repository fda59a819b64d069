//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while listing repositories
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP client could not be built
    #[error("failed to create GitHub client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never produced a response
    #[error("failed to fetch repositories: {0}")]
    Network(#[source] reqwest::Error),

    /// GitHub answered with something other than 200
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    /// The body was not a JSON array of repositories
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<Error> for gitvault_core::Error {
    fn from(err: Error) -> Self {
        gitvault_core::Error::listing(err)
    }
}
