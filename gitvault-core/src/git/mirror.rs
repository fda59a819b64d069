//! Bare mirror cloning and updating

use std::path::Path;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::{Error, Result};

/// The two git actions a sync performs
///
/// Implementations report failure as an error and never retry.
#[async_trait]
pub trait MirrorOps: Send + Sync {
    /// Create a bare mirror of `remote_url` at `target`
    ///
    /// The parent of `target` exists; `target` itself does not need to.
    async fn clone_mirror(&self, remote_url: &str, target: &Path) -> Result<()>;

    /// Fetch all remotes into the existing mirror at `target`
    async fn update_mirror(&self, target: &Path) -> Result<()>;
}

/// Mirror operations backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Path to the git executable (defaults to "git" in PATH)
    git_path: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            git_path: "git".to_string(),
        }
    }
}

impl GitCli {
    /// Create mirror operations using `git` from PATH
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom path to the git executable
    pub fn with_git_path(mut self, path: impl Into<String>) -> Self {
        self.git_path = path.into();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.git_path);
        // Unattended runs must fail instead of waiting for a password
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }
}

#[async_trait]
impl MirrorOps for GitCli {
    async fn clone_mirror(&self, remote_url: &str, target: &Path) -> Result<()> {
        let output = self
            .command()
            .arg("clone")
            .arg("--mirror")
            .arg(remote_url)
            .arg(target)
            .output()
            .await
            .map_err(|e| spawn_error("clone", e))?;

        check_output("clone", output)
    }

    async fn update_mirror(&self, target: &Path) -> Result<()> {
        // An explicit git dir stops discovery from climbing into an enclosing repository
        let output = self
            .command()
            .arg("--git-dir")
            .arg(target)
            .arg("remote")
            .arg("update")
            .output()
            .await
            .map_err(|e| spawn_error("remote update", e))?;

        check_output("remote update", output)
    }
}

fn spawn_error(operation: &'static str, err: std::io::Error) -> Error {
    Error::Git {
        operation,
        message: format!("failed to run git: {}", err),
    }
}

fn check_output(operation: &'static str, output: Output) -> Result<()> {
    let stderr = String::from_utf8_lossy(&output.stderr);

    if output.status.success() {
        if !stderr.trim().is_empty() {
            debug!(operation, output = %stderr.trim(), "git finished");
        }
        return Ok(());
    }

    Err(Error::Git {
        operation,
        message: describe_failure(&output, stderr.trim()),
    })
}

/// Prefix git's stderr with a hint for the failures users hit most
fn describe_failure(output: &Output, stderr: &str) -> String {
    let hint = if stderr.contains("Authentication failed") || stderr.contains("Permission denied")
    {
        Some("authentication failed, check the SSH key for this host")
    } else if stderr.contains("Could not resolve host") || stderr.contains("unable to access") {
        Some("network error")
    } else if stderr.contains("not found") || stderr.contains("does not exist") {
        Some("repository not found")
    } else {
        None
    };

    let detail = if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr.to_string()
    };

    match hint {
        Some(hint) => format!("{}: {}", hint, detail),
        None => detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn git_available() -> bool {
        let found = std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !found {
            eprintln!("skipping: git executable not found in PATH");
        }
        found
    }

    fn git(dir: &Path, args: &[&str]) -> String {
        let output = std::process::Command::new("git")
            .args(["-c", "user.name=GitVault Test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn source_repo(root: &Path) -> PathBuf {
        let source = root.join("source");
        std::fs::create_dir_all(&source).unwrap();
        git(&source, &["init", "--quiet"]);
        git(&source, &["commit", "--quiet", "--allow-empty", "-m", "first"]);
        source
    }

    #[tokio::test]
    async fn test_clone_then_update() {
        if !git_available() {
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let source = source_repo(tmp.path());
        let target = tmp.path().join("mirrors").join("source.git");
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();

        let ops = GitCli::new();
        ops.clone_mirror(source.to_str().unwrap(), &target)
            .await
            .unwrap();

        assert!(target.join("HEAD").exists());
        assert_eq!(git(&target, &["rev-parse", "--is-bare-repository"]), "true");
        assert_eq!(git(&target, &["rev-list", "--all", "--count"]), "1");

        git(&source, &["commit", "--quiet", "--allow-empty", "-m", "second"]);
        ops.update_mirror(&target).await.unwrap();

        assert_eq!(git(&target, &["rev-list", "--all", "--count"]), "2");
    }

    #[tokio::test]
    async fn test_update_leftover_dir_inside_worktree_fails() {
        if !git_available() {
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let worktree = source_repo(tmp.path());
        let leftover = worktree.join("repo1.git");
        std::fs::create_dir(&leftover).unwrap();

        let err = GitCli::new().update_mirror(&leftover).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Git {
                operation: "remote update",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_clone_missing_source_fails() {
        if !git_available() {
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("does-not-exist");
        let target = tmp.path().join("missing.git");

        let err = GitCli::new()
            .clone_mirror(missing.to_str().unwrap(), &target)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Git { operation: "clone", .. }));
        assert!(err.to_string().starts_with("git clone failed"));
    }

    #[tokio::test]
    async fn test_missing_git_binary() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = GitCli::new().with_git_path("/nonexistent/bin/git");

        let err = ops.update_mirror(tmp.path()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Git {
                operation: "remote update",
                ..
            }
        ));
        assert!(err.to_string().contains("failed to run git"));
    }
}
