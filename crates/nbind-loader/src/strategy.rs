//! Ordered load tiers and the first-success fold over them.

use nbind_platform::TargetId;
use std::fmt;
use tracing::{debug, info, warn};

use crate::{CapabilityModule, LoadError, LoadFailure, LoadReport, TierOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    LocalFile,
    FallbackPackage,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::LocalFile => f.write_str("local file"),
            Tier::FallbackPackage => f.write_str("fallback package"),
        }
    }
}

/// Result of asking one tier for a module.
#[derive(Debug)]
pub enum Attempt {
    Loaded(Box<dyn CapabilityModule>),
    /// Nothing to try at this tier; not an error.
    Skipped(String),
    Failed(LoadError),
}

impl From<Result<Box<dyn CapabilityModule>, LoadError>> for Attempt {
    fn from(result: Result<Box<dyn CapabilityModule>, LoadError>) -> Self {
        match result {
            Ok(module) => Attempt::Loaded(module),
            Err(err) => Attempt::Failed(err),
        }
    }
}

/// One way of obtaining a module for a target.
pub trait LoadStrategy {
    fn tier(&self) -> Tier;

    fn attempt(&self, target: TargetId) -> Attempt;
}

impl<S: LoadStrategy + ?Sized> LoadStrategy for Box<S> {
    fn tier(&self) -> Tier {
        (**self).tier()
    }

    fn attempt(&self, target: TargetId) -> Attempt {
        (**self).attempt(target)
    }
}

/// A module and the tier that produced it.
#[derive(Debug)]
pub struct Loaded {
    pub module: Box<dyn CapabilityModule>,
    pub tier: Tier,
    pub report: LoadReport,
}

/// Tries each tier in order; the first module wins.
#[derive(Default)]
pub struct Loader {
    tiers: Vec<Box<dyn LoadStrategy>>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(mut self, strategy: impl LoadStrategy + 'static) -> Self {
        self.tiers.push(Box::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Later tiers are never attempted once one succeeds.
    pub fn load(&self, target: TargetId) -> Result<Loaded, LoadFailure> {
        let mut report = LoadReport::new(target);

        for strategy in &self.tiers {
            let tier = strategy.tier();
            debug!(%target, %tier, "attempting load");

            match strategy.attempt(target) {
                Attempt::Loaded(module) => {
                    if tier == Tier::LocalFile {
                        report.local_file_existed = true;
                    }
                    info!(
                        %target,
                        %tier,
                        origin = %module.origin().display(),
                        "native binding loaded"
                    );
                    return Ok(Loaded {
                        module,
                        tier,
                        report,
                    });
                }
                Attempt::Skipped(reason) => {
                    debug!(%target, %tier, %reason, "tier skipped");
                    report.outcomes.push(TierOutcome::Skipped { tier, reason });
                }
                Attempt::Failed(error) => {
                    if tier == Tier::LocalFile {
                        report.local_file_existed = true;
                    }
                    warn!(%target, %tier, %error, "tier failed");
                    report.outcomes.push(TierOutcome::Failed { tier, error });
                }
            }
        }

        Err(LoadFailure::new(report))
    }
}

impl fmt::Debug for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiers: Vec<Tier> = self.tiers.iter().map(|s| s.tier()).collect();
        f.debug_struct("Loader").field("tiers", &tiers).finish()
    }
}
