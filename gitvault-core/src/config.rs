//! Configuration management for GitVault
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GITVAULT_*)
//! 3. Config file (~/.config/gitvault/config.toml)
//! 4. Default values
//!
//! Credentials are not part of this file, see [`crate::Secrets`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Secrets};

/// Default GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// Overall timeout for the repository listing request
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the GitHub token and username
    pub secrets_file: PathBuf,

    /// Directory holding one bare mirror per repository
    pub backup_dir: PathBuf,

    /// GitHub API configuration
    pub github: GitHubConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secrets_file: Secrets::default_secrets_path(),
            backup_dir: PathBuf::from("/backup"),
            github: GitHubConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/gitvault/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gitvault").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GITVAULT_SECRETS_FILE: Path to the secrets JSON file
    /// - GITVAULT_BACKUP_DIR: Directory for the mirrors
    /// - GITVAULT_API_URL: GitHub API base URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("GITVAULT_SECRETS_FILE") {
            self.secrets_file = PathBuf::from(path);
        }

        if let Ok(dir) = std::env::var("GITVAULT_BACKUP_DIR") {
            self.backup_dir = PathBuf::from(dir);
        }

        if let Ok(url) = std::env::var("GITVAULT_API_URL") {
            self.github.api_url = url;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        secrets_file: Option<PathBuf>,
        backup_dir: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Self {
        if let Some(path) = secrets_file {
            self.secrets_file = path;
        }

        if let Some(dir) = backup_dir {
            self.backup_dir = dir;
        }

        if let Some(url) = api_url {
            self.github.api_url = url;
        }

        self
    }

    /// Check values that cannot be expressed in the type
    pub fn validate(&self) -> Result<()> {
        if self.backup_dir.as_os_str().is_empty() {
            return Err(Error::Config("backup_dir cannot be empty".to_string()));
        }

        let url = url::Url::parse(&self.github.api_url).map_err(|e| {
            Error::Config(format!("Invalid GitHub API URL {}: {}", self.github.api_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Invalid GitHub API URL {}: expected http or https",
                self.github.api_url
            )));
        }

        Ok(())
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults. An explicit `config_file` must exist.
    pub fn load_with_overrides(
        config_file: Option<&Path>,
        secrets_file: Option<PathBuf>,
        backup_dir: Option<PathBuf>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let base = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };

        let config = base
            .with_env_overrides()
            .with_cli_overrides(secrets_file, backup_dir, api_url);
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.secrets_file, PathBuf::from("/secrets/gitvault.json"));
        assert_eq!(config.backup_dir, PathBuf::from("/backup"));
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(
            Some(PathBuf::from("/run/secrets/gitvault.json")),
            Some(PathBuf::from("/srv/mirrors")),
            Some("http://localhost:8080".to_string()),
        );

        assert_eq!(
            config.secrets_file,
            PathBuf::from("/run/secrets/gitvault.json")
        );
        assert_eq!(config.backup_dir, PathBuf::from("/srv/mirrors"));
        assert_eq!(config.github.api_url, "http://localhost:8080");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
secrets_file = "/etc/gitvault/secrets.json"
backup_dir = "/data/mirrors"

[github]
api_url = "https://github.example.com/api/v3"
timeout = "1m 30s"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.secrets_file,
            PathBuf::from("/etc/gitvault/secrets.json")
        );
        assert_eq!(config.backup_dir, PathBuf::from("/data/mirrors"));
        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.github.timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[github]
timeout = "5s"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // everything else should use defaults
        assert_eq!(config.backup_dir, PathBuf::from("/backup"));
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backup_dir = \"/tmp/mirrors\"\n").unwrap();

        let config =
            Config::load_with_overrides(Some(&path), None, None, Some(DEFAULT_API_URL.into()))
                .unwrap();
        assert_eq!(config.backup_dir, PathBuf::from("/tmp/mirrors"));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_api_url() {
        let config =
            Config::default().with_cli_overrides(None, None, Some("not a url".to_string()));
        assert!(config.validate().is_err());

        let config =
            Config::default().with_cli_overrides(None, None, Some("ftp://example.com".into()));
        assert!(config.validate().is_err());
    }
}
