//! GitHub REST client for listing a user's repositories

use std::time::Duration;

use async_trait::async_trait;
use gitvault_core::config::{GitHubConfig, DEFAULT_API_URL};
use gitvault_core::{RemoteRepository, RepositoryLister, Secrets};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::{Error, Result};

/// REST API version pinned on every request
pub const API_VERSION: &str = "2022-11-28";

/// User agent sent to GitHub
pub const USER_AGENT: &str = concat!("GitVault/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub API client bound to one account
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    username: String,
}

impl GitHubClient {
    /// Create a client for api.github.com with the default timeout
    pub fn new(secrets: &Secrets) -> Result<Self> {
        Self::build(secrets, DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }

    /// Create a client using the API URL and timeout from configuration
    pub fn from_config(secrets: &Secrets, config: &GitHubConfig) -> Result<Self> {
        Self::build(secrets, &config.api_url, config.timeout)
    }

    fn build(secrets: &Secrets, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(Error::Build)?;

        debug!(base_url, username = %secrets.github_username, "Created GitHub client");

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: secrets.github_token.clone(),
            username: secrets.github_username.clone(),
        })
    }

    /// Get the account whose repositories are listed
    pub fn username(&self) -> &str {
        &self.username
    }

    /// List the public repositories of the configured user
    ///
    /// Makes a single request; only the first page GitHub returns is seen.
    pub async fn list_user_repositories(&self) -> Result<Vec<RemoteRepository>> {
        let url = format!("{}/users/{}/repos", self.base_url, self.username);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%url, %status, "GitHub returned non-success for repository listing");
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(Error::Network)?;
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}

#[async_trait]
impl RepositoryLister for GitHubClient {
    async fn list_repositories(&self) -> gitvault_core::Result<Vec<RemoteRepository>> {
        Ok(self.list_user_repositories().await?)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
