//! Ambient host inspection.

use once_cell::sync::Lazy;
use std::io;
use std::path::Path;

/// Structured runtime report, the preferred libc signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeReport {
    /// glibc version the process runs against, absent on other C runtimes.
    pub glibc_version_runtime: Option<String>,
}

/// Everything the resolver reads from the host.
pub trait HostProbe {
    /// `std::env::consts::OS` spelling.
    fn os(&self) -> &str;

    /// `std::env::consts::ARCH` spelling.
    fn arch(&self) -> &str;

    /// `None` when the host offers no structured report.
    fn runtime_report(&self) -> Option<RuntimeReport>;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The running process and its filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveHost;

static LIVE_REPORT: Lazy<Option<RuntimeReport>> = Lazy::new(live_report);

#[cfg(target_os = "linux")]
fn live_report() -> Option<RuntimeReport> {
    Some(RuntimeReport {
        glibc_version_runtime: glibc_version(),
    })
}

#[cfg(not(target_os = "linux"))]
fn live_report() -> Option<RuntimeReport> {
    None
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn glibc_version() -> Option<String> {
    use std::ffi::CStr;

    // SAFETY: glibc returns a pointer to a static NUL-terminated string.
    let raw = unsafe { ::libc::gnu_get_libc_version() };
    if raw.is_null() {
        return None;
    }
    let version = unsafe { CStr::from_ptr(raw) };
    Some(version.to_string_lossy().into_owned())
}

#[cfg(all(target_os = "linux", not(target_env = "gnu")))]
fn glibc_version() -> Option<String> {
    None
}

impl HostProbe for LiveHost {
    fn os(&self) -> &str {
        std::env::consts::OS
    }

    fn arch(&self) -> &str {
        std::env::consts::ARCH
    }

    fn runtime_report(&self) -> Option<RuntimeReport> {
        LIVE_REPORT.clone()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
