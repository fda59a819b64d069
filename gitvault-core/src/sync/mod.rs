//! Mirror reconciliation
//!
//! A sync lists the remote repositories once, then walks them in order and either
//! clones a new bare mirror or updates the existing one. One repository failing
//! never stops the rest; only the listing and the backup directory are fatal.

mod plan;
mod reconciler;
mod report;

use async_trait::async_trait;

use crate::{RemoteRepository, Result};

pub use plan::{MirrorAction, PlannedMirror};
pub use reconciler::{prepare_backup_dir, Reconciler};
pub use report::{MirrorOutcome, RepositoryOutcome, SyncReport};

/// Source of the repositories to mirror
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    /// List every repository that should have a local mirror
    ///
    /// Errors should be wrapped with [`crate::Error::listing`].
    async fn list_repositories(&self) -> Result<Vec<RemoteRepository>>;
}
