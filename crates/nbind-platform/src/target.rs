//! Supported prebuilt variants and host resolution.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::{Arch, Error, HostProbe, Libc, Os, Result, detect_libc};

/// One prebuilt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub os: Os,
    pub arch: Arch,
    pub libc: Option<Libc>,
    pub id: &'static str,
}

const fn spec(os: Os, arch: Arch, libc: Option<Libc>, id: &'static str) -> TargetSpec {
    TargetSpec { os, arch, libc, id }
}

/// Every variant a native library is published for.
pub const SUPPORTED_TARGETS: &[TargetSpec] = &[
    spec(Os::Android, Arch::Arm64, None, "android-arm64"),
    spec(Os::Android, Arch::Arm, None, "android-arm-eabi"),
    spec(Os::Windows, Arch::X64, None, "win32-x64-msvc"),
    spec(Os::Windows, Arch::Ia32, None, "win32-ia32-msvc"),
    spec(Os::Windows, Arch::Arm64, None, "win32-arm64-msvc"),
    spec(Os::Macos, Arch::X64, None, "darwin-x64"),
    spec(Os::Macos, Arch::Arm64, None, "darwin-arm64"),
    spec(Os::FreeBsd, Arch::X64, None, "freebsd-x64"),
    spec(Os::Linux, Arch::X64, Some(Libc::Gnu), "linux-x64-gnu"),
    spec(Os::Linux, Arch::X64, Some(Libc::Musl), "linux-x64-musl"),
    spec(Os::Linux, Arch::Arm64, Some(Libc::Gnu), "linux-arm64-gnu"),
    spec(Os::Linux, Arch::Arm64, Some(Libc::Musl), "linux-arm64-musl"),
    spec(Os::Linux, Arch::Arm, Some(Libc::Gnu), "linux-arm-gnueabihf"),
];

/// Canonical name of a supported variant, e.g. `linux-x64-gnu`.
///
/// Only identifiers from [`SUPPORTED_TARGETS`] can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(&'static str);

impl TargetId {
    pub fn parse(id: &str) -> Result<Self> {
        SUPPORTED_TARGETS
            .iter()
            .find(|t| t.id == id)
            .map(|t| TargetId(t.id))
            .ok_or_else(|| Error::UnknownTarget(id.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for TargetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TargetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for TargetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TargetId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A validated host triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTarget {
    spec: &'static TargetSpec,
}

impl HostTarget {
    /// Look up a triple in the supported table.
    pub fn new(os: Os, arch: Arch, libc: Option<Libc>) -> Result<Self> {
        SUPPORTED_TARGETS
            .iter()
            .find(|t| t.os == os && t.arch == arch && t.libc == libc)
            .map(|spec| HostTarget { spec })
            .ok_or_else(|| Error::UnsupportedArch {
                os,
                arch: arch.token().to_string(),
            })
    }

    pub fn os(&self) -> Os {
        self.spec.os
    }

    pub fn arch(&self) -> Arch {
        self.spec.arch
    }

    pub fn libc(&self) -> Option<Libc> {
        self.spec.libc
    }

    pub fn id(&self) -> TargetId {
        TargetId(self.spec.id)
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec.id)
    }
}

/// Resolve the host to a supported variant.
///
/// Fails on any os/arch outside the table. The libc probe only runs when the
/// table holds more than one libc variant for the pair.
pub fn resolve<P: HostProbe + ?Sized>(probe: &P) -> Result<HostTarget> {
    let raw_os = probe.os();
    let raw_arch = probe.arch();

    let os = Os::parse(raw_os).ok_or_else(|| Error::UnsupportedOs {
        os: raw_os.to_string(),
        arch: raw_arch.to_string(),
    })?;
    let unsupported_arch = || Error::UnsupportedArch {
        os,
        arch: raw_arch.to_string(),
    };
    let arch = Arch::parse(raw_arch).ok_or_else(unsupported_arch)?;

    let candidates: Vec<&'static TargetSpec> = SUPPORTED_TARGETS
        .iter()
        .filter(|t| t.os == os && t.arch == arch)
        .collect();

    let spec = match candidates.as_slice() {
        [] => return Err(unsupported_arch()),
        [only] => *only,
        _ => {
            let libc = detect_libc(probe);
            candidates
                .iter()
                .copied()
                .find(|t| t.libc == Some(libc))
                .ok_or_else(unsupported_arch)?
        }
    };

    debug!(target = spec.id, os = raw_os, arch = raw_arch, "resolved host target");
    Ok(HostTarget { spec })
}
