//! Prebuilt native binding for the current host.
//!
//! # Architecture
//!
//! Initialization runs once per process:
//!
//! 1. resolve the host to a target such as `linux-x64-gnu` ([`nbind_platform`])
//! 2. load `<binding>.<target>.node` from the loader directory, or the
//!    per-target fallback package ([`nbind_loader`])
//! 3. bind the fixed set of exported functions into [`Capabilities`]
//!
//! Any failure is final for the process: [`capabilities`] stays `None` and
//! [`initialize`] keeps returning the same error.
//!
//! # Example
//!
//! ```no_run
//! let caps = nbind::initialize().unwrap();
//!
//! let mut digest = [0u8; 32];
//! let data = b"hello";
//! let written = unsafe {
//!     (caps.blake3)(data.as_ptr(), data.len(), digest.as_mut_ptr(), digest.len())
//! };
//! assert_eq!(written, 32);
//! ```

pub use self::binding::{Binding, Phase, Pipeline};
pub use self::capabilities::Capabilities;
pub use self::config::Config;
pub use self::error::{Error, Result};

pub use nbind_loader::{LoadFailure, Tier};
pub use nbind_platform::{HostTarget, TargetId};

pub mod abi;
mod binding;
mod capabilities;
mod config;
mod error;

static BINDING: Binding = Binding::new();

/// Resolve, load and bind the native binding for this process.
///
/// Only the first call does any work.
pub fn initialize() -> std::result::Result<&'static Capabilities, &'static Error> {
    BINDING.initialize(|| Ok(Pipeline::new(nbind_platform::LiveHost, Config::load()?)))
}

/// The bound functions, once [`initialize`] has succeeded.
pub fn capabilities() -> Option<&'static Capabilities> {
    BINDING.capabilities()
}

/// Where the process-wide binding is in its lifecycle.
pub fn phase() -> Phase {
    BINDING.phase()
}
