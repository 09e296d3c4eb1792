//! Error types for native library loading.

use nbind_platform::TargetId;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::Tier;

pub type Result<T> = std::result::Result<T, LoadError>;

/// Why a single tier could not produce a module.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("cannot find package '{name}' (searched: {searched})")]
    PackageNotFound { name: String, searched: String },

    #[error("invalid package manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("symbol '{name}' not found in {}: {reason}", .path.display())]
    Symbol {
        name: String,
        path: PathBuf,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// What one tier did during a load.
#[derive(Debug)]
pub enum TierOutcome {
    Skipped { tier: Tier, reason: String },
    Failed { tier: Tier, error: LoadError },
}

impl TierOutcome {
    pub fn tier(&self) -> Tier {
        match self {
            TierOutcome::Skipped { tier, .. } | TierOutcome::Failed { tier, .. } => *tier,
        }
    }
}

impl fmt::Display for TierOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierOutcome::Skipped { tier, reason } => write!(f, "{tier} skipped: {reason}"),
            TierOutcome::Failed { tier, error } => write!(f, "{tier}: {error}"),
        }
    }
}

/// Diagnostics gathered while walking the tiers.
#[derive(Debug)]
pub struct LoadReport {
    pub target: TargetId,
    pub local_file_existed: bool,
    pub outcomes: Vec<TierOutcome>,
}

impl LoadReport {
    pub fn new(target: TargetId) -> Self {
        Self {
            target,
            local_file_existed: false,
            outcomes: Vec::new(),
        }
    }

    /// The error of the last tier that failed outright.
    pub fn last_error(&self) -> Option<(Tier, &LoadError)> {
        self.outcomes.iter().rev().find_map(|outcome| match outcome {
            TierOutcome::Failed { tier, error } => Some((*tier, error)),
            TierOutcome::Skipped { .. } => None,
        })
    }
}

/// Every tier was exhausted without producing a module.
#[derive(Debug)]
pub struct LoadFailure {
    report: LoadReport,
}

impl LoadFailure {
    pub fn new(report: LoadReport) -> Self {
        Self { report }
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn last_error(&self) -> Option<(Tier, &LoadError)> {
        self.report.last_error()
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load native binding for {}", self.report.target)?;

        let last = self
            .report
            .outcomes
            .iter()
            .rposition(|o| matches!(o, TierOutcome::Failed { .. }));
        if let Some(index) = last {
            write!(f, ": {}", self.report.outcomes[index])?;
        }

        let earlier: Vec<String> = self
            .report
            .outcomes
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != last)
            .map(|(_, o)| o.to_string())
            .collect();
        if !earlier.is_empty() {
            write!(f, " ({})", earlier.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.last_error()
            .map(|(_, error)| error as &(dyn std::error::Error + 'static))
    }
}
