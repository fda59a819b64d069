//! The sync loop

use std::path::Path;

use tracing::{error, info};

use super::plan::{MirrorAction, PlannedMirror};
use super::report::{MirrorOutcome, SyncReport};
use super::RepositoryLister;
use crate::git::MirrorOps;
use crate::{Error, RemoteRepository, Result};

/// Brings the backup directory in line with the remote listing
pub struct Reconciler<'a> {
    lister: &'a dyn RepositoryLister,
    mirrors: &'a dyn MirrorOps,
}

impl std::fmt::Debug for Reconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler").finish_non_exhaustive()
    }
}

impl<'a> Reconciler<'a> {
    pub fn new(lister: &'a dyn RepositoryLister, mirrors: &'a dyn MirrorOps) -> Self {
        Self { lister, mirrors }
    }

    /// Full sync: create the backup directory, list, then mirror everything
    ///
    /// Only a failed listing or an uncreatable backup directory is an error.
    pub async fn run(&self, backup_dir: &Path) -> Result<SyncReport> {
        prepare_backup_dir(backup_dir).await?;

        let repositories = self.list().await?;
        Ok(self.mirror_all(backup_dir, &repositories).await)
    }

    /// Mirror an already listed set of repositories
    pub async fn reconcile(
        &self,
        backup_dir: &Path,
        repositories: &[RemoteRepository],
    ) -> Result<SyncReport> {
        prepare_backup_dir(backup_dir).await?;
        Ok(self.mirror_all(backup_dir, repositories).await)
    }

    /// Decide the action for each repository without touching the disk or running git
    pub async fn dry_run<'r>(
        &self,
        backup_dir: &Path,
        repositories: &'r [RemoteRepository],
    ) -> Vec<PlannedMirror<'r>> {
        let mut plans = Vec::with_capacity(repositories.len());
        for repository in repositories {
            plans.push(PlannedMirror::new(backup_dir, repository).await);
        }
        plans
    }

    /// Fetch the remote listing
    pub async fn list(&self) -> Result<Vec<RemoteRepository>> {
        let repositories = self.lister.list_repositories().await?;
        info!("fetched {} repositories from GitHub", repositories.len());
        Ok(repositories)
    }

    async fn mirror_all(&self, backup_dir: &Path, repositories: &[RemoteRepository]) -> SyncReport {
        let mut report = SyncReport::new();

        for repository in repositories {
            let plan = PlannedMirror::new(backup_dir, repository).await;
            let outcome = self.apply(&plan).await;
            report.record(&repository.full_name, plan.path, outcome);
        }

        info!(
            total = report.total(),
            cloned = report.cloned(),
            updated = report.updated(),
            failed = report.failed(),
            "sync completed successfully"
        );

        report
    }

    async fn apply(&self, plan: &PlannedMirror<'_>) -> MirrorOutcome {
        let repository = &plan.repository.full_name;
        let dir = plan.path.display();

        match plan.action {
            MirrorAction::Update => {
                info!(repository = %repository, dir = %dir, "updating mirror");
                match self.mirrors.update_mirror(&plan.path).await {
                    Ok(()) => MirrorOutcome::Updated,
                    Err(e) => {
                        error!(repository = %repository, error = %e, "failed to update mirror");
                        MirrorOutcome::UpdateFailed {
                            error: e.to_string(),
                        }
                    }
                }
            }
            MirrorAction::Clone => {
                info!(repository = %repository, dir = %dir, "cloning mirror");
                match self
                    .mirrors
                    .clone_mirror(&plan.repository.ssh_url, &plan.path)
                    .await
                {
                    Ok(()) => MirrorOutcome::Cloned,
                    Err(e) => {
                        error!(repository = %repository, error = %e, "failed to clone mirror");
                        MirrorOutcome::CloneFailed {
                            error: e.to_string(),
                        }
                    }
                }
            }
        }
    }
}

/// Create the backup root and its parents, unless it is the current directory
pub async fn prepare_backup_dir(backup_dir: &Path) -> Result<()> {
    if backup_dir == Path::new(".") {
        return Ok(());
    }

    tokio::fs::create_dir_all(backup_dir)
        .await
        .map_err(|source| Error::BackupDir {
            dir: backup_dir.display().to_string(),
            source,
        })
}
