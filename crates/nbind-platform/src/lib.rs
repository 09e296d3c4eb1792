//! Host target detection for prebuilt native libraries.
//!
//! Maps the running host's (os, arch, libc) triple to one entry of a fixed
//! table of supported prebuilt variants. Everything the resolver knows about
//! the host comes through [`HostProbe`], so each detection branch can be
//! driven from tests.
//!
//! # Example
//!
//! ```
//! use nbind_platform::{LiveHost, resolve};
//!
//! match resolve(&LiveHost) {
//!     Ok(target) => println!("loading {}", target.id()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub use self::arch::Arch;
pub use self::error::{Error, Result};
pub use self::libc_detect::{LDD_PATH, Libc, detect_libc};
pub use self::os::Os;
pub use self::probe::{HostProbe, LiveHost, RuntimeReport};
pub use self::target::{HostTarget, SUPPORTED_TARGETS, TargetId, TargetSpec, resolve};

mod arch;
mod error;
mod libc_detect;
mod os;
mod probe;
mod target;
