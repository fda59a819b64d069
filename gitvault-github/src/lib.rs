//! GitVault GitHub - GitHub integration for GitVault
//!
//! This crate lists a user's repositories through the GitHub REST API and plugs
//! into the core reconciler as its [`gitvault_core::RepositoryLister`].

mod client;
mod error;

pub use client::{GitHubClient, API_VERSION, USER_AGENT};
pub use error::{Error, Result};
