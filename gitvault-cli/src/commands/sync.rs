//! Sync command - Mirror every repository of the configured user

use clap::Args;
use gitvault_core::{Config, GitCli, Reconciler, Secrets};
use gitvault_github::GitHubClient;

/// Arguments for the sync command
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Show what would be cloned or updated without running git
    #[arg(long)]
    pub dry_run: bool,

    /// Path to the git executable (defaults to git in PATH)
    #[arg(long, env = "GITVAULT_GIT")]
    pub git: Option<String>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let secrets = Secrets::load(&config.secrets_file)?;
        let github = GitHubClient::from_config(&secrets, &config.github)?;

        let git = match &self.git {
            Some(path) => GitCli::new().with_git_path(path),
            None => GitCli::new(),
        };

        let reconciler = Reconciler::new(&github, &git);

        if self.dry_run {
            let repositories = reconciler.list().await?;
            let plans = reconciler.dry_run(&config.backup_dir, &repositories).await;

            println!("[Dry run] {} repositories for {}", plans.len(), github.username());
            for plan in &plans {
                println!(
                    "  {:<6} {} -> {}",
                    plan.action,
                    plan.repository.full_name,
                    plan.path.display()
                );
            }
            return Ok(());
        }

        let report = reconciler.run(&config.backup_dir).await?;

        if !report.is_clean() {
            for failure in report.outcomes().iter().filter(|r| !r.outcome.is_success()) {
                tracing::warn!(
                    repository = %failure.full_name,
                    dir = %failure.path.display(),
                    "mirror is out of date"
                );
            }
        }

        Ok(())
    }
}
