//! Remote repository model and mirror path derivation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A repository as returned by the GitHub listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RemoteRepository {
    /// GitHub repository id
    pub id: i64,
    /// Full name in `owner/name` form
    pub full_name: String,
    /// SSH clone URL
    pub ssh_url: String,
}

impl RemoteRepository {
    /// Create a repository descriptor
    pub fn new(id: i64, full_name: impl Into<String>, ssh_url: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            ssh_url: ssh_url.into(),
        }
    }

    /// Name of the local mirror, without the `.git` suffix
    pub fn mirror_name(&self) -> &str {
        mirror_name(&self.full_name)
    }
}

/// Derive the mirror name from a repository full name
///
/// Everything after the first `/`, or the whole input when there is none.
pub fn mirror_name(full_name: &str) -> &str {
    match full_name.split_once('/') {
        Some((_, name)) => name,
        None => full_name,
    }
}

/// Path of the bare mirror for `full_name` under `backup_dir`
pub fn mirror_path(backup_dir: &Path, full_name: &str) -> PathBuf {
    // Leading slashes would make the join absolute
    let name = mirror_name(full_name).trim_start_matches('/');
    backup_dir.join(format!("{}.git", name))
}
