//! Outcomes of a sync run

use std::path::PathBuf;

/// Terminal state of one repository in a sync
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// A new mirror was cloned
    Cloned,
    /// Cloning failed; whatever git left on disk stays there
    CloneFailed { error: String },
    /// An existing mirror was updated
    Updated,
    /// Updating the existing mirror failed
    UpdateFailed { error: String },
}

impl MirrorOutcome {
    /// Check if the git operation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, MirrorOutcome::Cloned | MirrorOutcome::Updated)
    }

    /// Get the error message if the operation failed
    pub fn error(&self) -> Option<&str> {
        match self {
            MirrorOutcome::CloneFailed { error } | MirrorOutcome::UpdateFailed { error } => {
                Some(error)
            }
            MirrorOutcome::Cloned | MirrorOutcome::Updated => None,
        }
    }
}

/// Outcome for a single repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOutcome {
    /// Repository full name (`owner/name`)
    pub full_name: String,
    /// Mirror directory
    pub path: PathBuf,
    /// What happened
    pub outcome: MirrorOutcome,
}

/// Per-repository outcomes of a sync, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    outcomes: Vec<RepositoryOutcome>,
}

impl SyncReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one repository
    pub fn record(&mut self, full_name: impl Into<String>, path: PathBuf, outcome: MirrorOutcome) {
        self.outcomes.push(RepositoryOutcome {
            full_name: full_name.into(),
            path,
            outcome,
        });
    }

    /// All recorded outcomes
    pub fn outcomes(&self) -> &[RepositoryOutcome] {
        &self.outcomes
    }

    /// Number of repositories processed
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of successful clones
    pub fn cloned(&self) -> usize {
        self.count(|o| matches!(o, MirrorOutcome::Cloned))
    }

    /// Number of successful updates
    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, MirrorOutcome::Updated))
    }

    /// Number of failed clones or updates
    pub fn failed(&self) -> usize {
        self.count(|o| !o.is_success())
    }

    /// True when no repository failed
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&MirrorOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|r| pred(&r.outcome)).count()
    }
}
