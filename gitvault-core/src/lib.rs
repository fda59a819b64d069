//! GitVault Core - Core library for GitVault repository mirroring
//!
//! This crate holds the pieces that do not talk to GitHub directly: settings and
//! secrets loading, the remote repository model, the git mirror operations and the
//! reconciler that decides, per repository, whether to clone or update.

pub mod config;
pub mod error;
pub mod git;
pub mod repository;
pub mod secrets;
pub mod sync;

pub use config::Config;
pub use error::{Error, Result};
pub use git::{GitCli, MirrorOps};
pub use repository::{mirror_name, mirror_path, RemoteRepository};
pub use secrets::Secrets;
pub use sync::{
    MirrorAction, MirrorOutcome, PlannedMirror, Reconciler, RepositoryLister, SyncReport,
};
