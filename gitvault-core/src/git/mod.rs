//! Git operations for GitVault
//!
//! This module provides the two mirror operations the reconciler needs and a
//! production implementation that shells out to `git`.

mod mirror;

pub use mirror::{GitCli, MirrorOps};
