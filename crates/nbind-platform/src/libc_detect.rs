//! C library flavor detection on Linux.

use std::path::Path;
use tracing::debug;

use crate::HostProbe;

/// Inspected when no runtime report is available.
pub const LDD_PATH: &str = "/usr/bin/ldd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Libc {
    Gnu,
    Musl,
}

/// Decide between glibc and musl.
///
/// A runtime report wins when present: a glibc version means gnu, a missing
/// or empty version means musl. Without a report, `ldd` is scanned for `musl`. If `ldd` cannot
/// be read the answer is musl, whose static builds run on either.
pub fn detect_libc<P: HostProbe + ?Sized>(probe: &P) -> Libc {
    if let Some(report) = probe.runtime_report() {
        let libc = match report.glibc_version_runtime {
            Some(version) if !version.is_empty() => {
                debug!(glibc = %version, "runtime report names glibc");
                Libc::Gnu
            }
            _ => Libc::Musl,
        };
        debug!(?libc, "libc from runtime report");
        return libc;
    }

    match probe.read(Path::new(LDD_PATH)) {
        Ok(bytes) => {
            let libc = if contains(&bytes, b"musl") {
                Libc::Musl
            } else {
                Libc::Gnu
            };
            debug!(?libc, path = LDD_PATH, "libc from ldd contents");
            libc
        }
        Err(err) => {
            debug!(error = %err, path = LDD_PATH, "ldd unreadable, assuming musl");
            Libc::Musl
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
