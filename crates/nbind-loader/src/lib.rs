//! Loading of a prebuilt native library for a resolved target.
//!
//! # Architecture
//!
//! A [`Loader`] holds an ordered list of [`LoadStrategy`] tiers and returns
//! the first module any of them produces. Skips and failures fall through to
//! the next tier; only exhaustion is an error, reported as [`LoadFailure`]
//! with every tier's outcome.
//!
//! Two tiers ship with the crate:
//!
//! - [`LocalArtifact`]: `<binding>.<target>.node` next to the loader
//! - [`FallbackPackage`]: the per-target package `<scope>/<prefix>-<target>`
//!
//! # Example
//!
//! ```no_run
//! use nbind_loader::{FallbackPackage, LocalArtifact, Loader};
//! use nbind_platform::{LiveHost, resolve};
//!
//! let target = resolve(&LiveHost).unwrap();
//! let loader = Loader::new()
//!     .tier(LocalArtifact::new("/opt/app", "rust"))
//!     .tier(FallbackPackage::new("/opt/app", "@user.tax", "rust", "rust"));
//!
//! let loaded = loader.load(target.id()).unwrap();
//! println!("loaded {}", loaded.module.origin().display());
//! ```

pub use self::error::{LoadError, LoadFailure, LoadReport, Result, TierOutcome};
pub use self::local::{LocalArtifact, artifact_file_name};
pub use self::module::{CapabilityModule, DylibOpener, ModuleOpener, NativeLibrary, RawSymbol};
pub use self::package::FallbackPackage;
pub use self::strategy::{Attempt, LoadStrategy, Loaded, Loader, Tier};

mod error;
mod local;
mod module;
mod package;
mod strategy;
