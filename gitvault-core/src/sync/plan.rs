//! Per-repository clone or update decision

use std::fmt;
use std::path::{Path, PathBuf};

use crate::repository::mirror_path;
use crate::RemoteRepository;

/// What a sync will do for one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorAction {
    /// No mirror directory yet
    Clone,
    /// A mirror directory already exists
    Update,
}

impl fmt::Display for MirrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorAction::Clone => f.pad("clone"),
            MirrorAction::Update => f.pad("update"),
        }
    }
}

/// A repository together with its mirror path and the action to take
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMirror<'a> {
    pub repository: &'a RemoteRepository,
    pub path: PathBuf,
    pub action: MirrorAction,
}

impl<'a> PlannedMirror<'a> {
    /// Decide the action for `repository` from what is on disk under `backup_dir`
    ///
    /// Only an existing directory counts as a mirror. A regular file at the path
    /// gets a clone, which git will refuse.
    pub async fn new(backup_dir: &Path, repository: &'a RemoteRepository) -> Self {
        let path = mirror_path(backup_dir, &repository.full_name);
        let is_dir = tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);

        let action = if is_dir {
            MirrorAction::Update
        } else {
            MirrorAction::Clone
        };

        Self {
            repository,
            path,
            action,
        }
    }
}
