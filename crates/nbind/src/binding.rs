//! One-shot resolve → load → bind lifecycle.

use nbind_loader::{DylibOpener, FallbackPackage, LocalArtifact, Loader, ModuleOpener};
use nbind_platform::{HostProbe, HostTarget, resolve};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{error, info};

use crate::{Capabilities, Config, Error, Result};

/// `Uninitialized → Resolving → Loading → Ready | Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Uninitialized = 0,
    Resolving = 1,
    Loading = 2,
    Ready = 3,
    Failed = 4,
}

/// Inputs of a single initialization run.
#[derive(Debug, Clone)]
pub struct Pipeline<P, O = DylibOpener> {
    probe: P,
    config: Config,
    opener: O,
}

impl<P: HostProbe> Pipeline<P> {
    pub fn new(probe: P, config: Config) -> Self {
        Self {
            probe,
            config,
            opener: DylibOpener,
        }
    }
}

impl<P, O> Pipeline<P, O> {
    pub fn with_opener<Q>(self, opener: Q) -> Pipeline<P, Q> {
        Pipeline {
            probe: self.probe,
            config: self.config,
            opener,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<P, O> Pipeline<P, O>
where
    P: HostProbe,
    O: ModuleOpener + Clone + 'static,
{
    pub fn resolve(&self) -> Result<HostTarget> {
        Ok(resolve(&self.probe)?)
    }

    /// Local artifact first, then the fallback package.
    pub fn loader(&self) -> Result<Loader> {
        let config = &self.config;
        let dir = config.local_dir()?;

        let local = LocalArtifact::new(dir.clone(), config.binding_name.clone())
            .with_opener(self.opener.clone());
        let fallback = FallbackPackage::new(
            dir,
            config.package_scope.clone(),
            config.package_prefix.clone(),
            config.binding_name.clone(),
        )
        .roots(config.package_roots.iter().cloned())
        .with_opener(self.opener.clone());

        Ok(Loader::new().tier(local).tier(fallback))
    }
}

/// Write-once holder of the capability table.
///
/// The pipeline runs at most once; every later call observes the same
/// outcome, success or failure.
#[derive(Debug)]
pub struct Binding {
    phase: AtomicU8,
    outcome: OnceCell<Result<Capabilities>>,
}

impl Default for Binding {
    fn default() -> Self {
        Self::new()
    }
}

impl Binding {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(Phase::Uninitialized as u8),
            outcome: OnceCell::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self.outcome.get() {
            Some(Ok(_)) => Phase::Ready,
            Some(Err(_)) => Phase::Failed,
            None => match self.phase.load(Ordering::Acquire) {
                1 => Phase::Resolving,
                2 => Phase::Loading,
                _ => Phase::Uninitialized,
            },
        }
    }

    /// `Some` only once initialization has succeeded.
    pub fn capabilities(&self) -> Option<&Capabilities> {
        self.outcome.get().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn error(&self) -> Option<&Error> {
        self.outcome.get().and_then(|outcome| outcome.as_ref().err())
    }

    /// Run the pipeline built by `build`, unless a run already happened.
    pub fn initialize<P, O, F>(&self, build: F) -> std::result::Result<&Capabilities, &Error>
    where
        P: HostProbe,
        O: ModuleOpener + Clone + 'static,
        F: FnOnce() -> Result<Pipeline<P, O>>,
    {
        self.outcome
            .get_or_init(|| {
                self.enter(Phase::Resolving);
                let outcome = build().and_then(|pipeline| self.run(&pipeline));
                match &outcome {
                    Ok(caps) => info!(origin = %caps.origin().display(), "native binding ready"),
                    Err(err) => error!(%err, "native binding unavailable"),
                }
                outcome
            })
            .as_ref()
    }

    fn run<P, O>(&self, pipeline: &Pipeline<P, O>) -> Result<Capabilities>
    where
        P: HostProbe,
        O: ModuleOpener + Clone + 'static,
    {
        let target = pipeline.resolve()?;
        info!(%target, "resolved native binding target");

        self.enter(Phase::Loading);
        let loaded = pipeline.loader()?.load(target.id())?;
        Capabilities::bind(loaded.module)
    }

    fn enter(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::Release);
    }
}
