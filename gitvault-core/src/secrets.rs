//! Secrets file handling for GitVault
//!
//! The GitHub credentials live in their own JSON file, usually a container secret
//! mounted at `/secrets/gitvault.json`:
//!
//! ```json
//! { "github_token": "ghp_...", "github_username": "octocat" }
//! ```
//!
//! Both values are trimmed and must be non-empty before a sync can start.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Error, Result};

/// GitHub credentials read from the secrets file
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Secrets {
    /// GitHub Personal Access Token
    pub github_token: String,

    /// Account whose repositories are mirrored
    pub github_username: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("github_token", &"<redacted>")
            .field("github_username", &self.github_username)
            .finish()
    }
}

impl Secrets {
    /// Create secrets from already known values
    pub fn new(github_token: impl Into<String>, github_username: impl Into<String>) -> Self {
        Self {
            github_token: github_token.into(),
            github_username: github_username.into(),
        }
    }

    /// Load and validate secrets from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let secrets = Self::load_from_file(path).map_err(|e| {
            Error::Config(format!("error while loading {}: {}", path.display(), e))
        })?;

        secrets.validate()?;
        debug!(path = %path.display(), username = %secrets.github_username, "Secrets loaded");

        Ok(secrets)
    }

    /// Read and trim secrets from `path` without validating them
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        warn_if_shared(path);
        Self::from_json(&contents)
    }

    /// Parse secrets from JSON text, trimming both values
    pub fn from_json(contents: &str) -> Result<Self> {
        let mut secrets: Secrets = serde_json::from_str(contents)?;
        secrets.github_token = secrets.github_token.trim().to_string();
        secrets.github_username = secrets.github_username.trim().to_string();
        Ok(secrets)
    }

    /// Check that both credentials are present
    pub fn validate(&self) -> Result<()> {
        if self.github_token.is_empty() {
            return Err(Error::Config(
                "GitHub token is either missing or empty".to_string(),
            ));
        }

        if self.github_username.is_empty() {
            return Err(Error::Config(
                "GitHub username is either missing or empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the default secrets file path
    pub fn default_secrets_path() -> PathBuf {
        PathBuf::from("/secrets/gitvault.json")
    }
}

/// Secret mounts are often world-readable, so this only warns
#[cfg(unix)]
fn warn_if_shared(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = format!("{:o}", mode & 0o777),
                "Secrets file is readable by other users, consider chmod 600"
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_shared(_path: &Path) {}
