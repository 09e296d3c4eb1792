//! Operating system classification.

use std::fmt;

/// Operating systems with at least one prebuilt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Android,
    Windows,
    Macos,
    FreeBsd,
    Linux,
}

impl Os {
    /// Parse a `std::env::consts::OS` value.
    pub fn parse(os: &str) -> Option<Self> {
        match os {
            "android" => Some(Os::Android),
            "windows" => Some(Os::Windows),
            "macos" => Some(Os::Macos),
            "freebsd" => Some(Os::FreeBsd),
            "linux" => Some(Os::Linux),
            _ => None,
        }
    }

    /// Leading component of a target identifier.
    pub fn token(self) -> &'static str {
        match self {
            Os::Android => "android",
            Os::Windows => "win32",
            Os::Macos => "darwin",
            Os::FreeBsd => "freebsd",
            Os::Linux => "linux",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Os::Android => "Android",
            Os::Windows => "Windows",
            Os::Macos => "macOS",
            Os::FreeBsd => "FreeBSD",
            Os::Linux => "Linux",
        };
        f.write_str(name)
    }
}
