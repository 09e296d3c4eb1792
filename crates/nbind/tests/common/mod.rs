#![allow(dead_code)]

use nbind::abi::{BytesFn, CipherFn, DigestU64Fn, FillFn, U64BytesFn, UnzipU64Fn, ZipU64Fn};
use nbind_loader::{CapabilityModule, LoadError, ModuleOpener, RawSymbol};
use nbind_platform::{HostProbe, RuntimeReport};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct FakeHost {
    pub os: &'static str,
    pub arch: &'static str,
    pub report: Option<RuntimeReport>,
    pub ldd: Option<&'static str>,
}

impl FakeHost {
    pub fn glibc(arch: &'static str) -> Self {
        Self {
            os: "linux",
            arch,
            report: Some(RuntimeReport {
                glibc_version_runtime: Some("2.38".into()),
            }),
            ldd: None,
        }
    }

    pub fn other(os: &'static str, arch: &'static str) -> Self {
        Self {
            os,
            arch,
            report: None,
            ldd: None,
        }
    }
}

impl HostProbe for FakeHost {
    fn os(&self) -> &str {
        self.os
    }

    fn arch(&self) -> &str {
        self.arch
    }

    fn runtime_report(&self) -> Option<RuntimeReport> {
        self.report.clone()
    }

    fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
        self.ldd
            .map(|s| s.as_bytes().to_vec())
            .ok_or_else(|| io::ErrorKind::NotFound.into())
    }
}

unsafe extern "C" fn z85_dump(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    0
}
unsafe extern "C" fn z85_load(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    1
}
unsafe extern "C" fn ip_bin(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    2
}
unsafe extern "C" fn bin_u64(_: *const u8, _: usize) -> u64 {
    3
}
unsafe extern "C" fn u64_bin(_: u64, _: *mut u8, _: usize) -> isize {
    4
}
unsafe extern "C" fn zip_u64(_: *const u64, _: usize, _: *mut u8, _: usize) -> isize {
    5
}
unsafe extern "C" fn unzip_u64(_: *const u8, _: usize, _: *mut u64, _: usize) -> isize {
    6
}
unsafe extern "C" fn b64(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    7
}
unsafe extern "C" fn unb64(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    8
}
unsafe extern "C" fn blake3_round(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    9
}
unsafe extern "C" fn blake3(_: *const u8, _: usize, _: *mut u8, _: usize) -> isize {
    10
}

/// Input length, so argument passing is observable.
unsafe extern "C" fn xxh3(_: *const u8, len: usize) -> u64 {
    len as u64
}

unsafe extern "C" fn encrypt(
    _: *const u8,
    _: usize,
    _: *const u8,
    _: usize,
    _: *mut u8,
    _: usize,
) -> isize {
    12
}
unsafe extern "C" fn decrypt(
    _: *const u8,
    _: usize,
    _: *const u8,
    _: usize,
    _: *mut u8,
    _: usize,
) -> isize {
    13
}

/// Fills the buffer with 0xAB.
unsafe extern "C" fn random_bytes(out: *mut u8, len: usize) -> isize {
    unsafe { std::ptr::write_bytes(out, 0xAB, len) };
    len as isize
}

fn symbol_table() -> HashMap<&'static str, RawSymbol> {
    use std::mem::transmute;

    unsafe {
        HashMap::from([
            ("z85Dump", transmute::<BytesFn, RawSymbol>(z85_dump)),
            ("z85Load", transmute::<BytesFn, RawSymbol>(z85_load)),
            ("ipBin", transmute::<BytesFn, RawSymbol>(ip_bin)),
            ("binU64", transmute::<DigestU64Fn, RawSymbol>(bin_u64)),
            ("u64Bin", transmute::<U64BytesFn, RawSymbol>(u64_bin)),
            ("zipU64", transmute::<ZipU64Fn, RawSymbol>(zip_u64)),
            ("unzipU64", transmute::<UnzipU64Fn, RawSymbol>(unzip_u64)),
            ("b64", transmute::<BytesFn, RawSymbol>(b64)),
            ("unb64", transmute::<BytesFn, RawSymbol>(unb64)),
            ("blake3Round", transmute::<BytesFn, RawSymbol>(blake3_round)),
            ("blake3", transmute::<BytesFn, RawSymbol>(blake3)),
            ("xxh3", transmute::<DigestU64Fn, RawSymbol>(xxh3)),
            ("encrypt", transmute::<CipherFn, RawSymbol>(encrypt)),
            ("decrypt", transmute::<CipherFn, RawSymbol>(decrypt)),
            ("randomBytes", transmute::<FillFn, RawSymbol>(random_bytes)),
        ])
    }
}

#[derive(Debug)]
pub struct FakeModule {
    origin: PathBuf,
    symbols: HashMap<&'static str, RawSymbol>,
}

impl CapabilityModule for FakeModule {
    fn origin(&self) -> &Path {
        &self.origin
    }

    fn symbol(&self, name: &str) -> nbind_loader::Result<RawSymbol> {
        self.symbols.get(name).copied().ok_or_else(|| LoadError::Symbol {
            name: name.to_string(),
            path: self.origin.clone(),
            reason: "undefined symbol".into(),
        })
    }
}

/// Opens any existing file as a [`FakeModule`] and records every path.
#[derive(Clone, Default)]
pub struct FakeOpener {
    opened: Arc<Mutex<Vec<PathBuf>>>,
    broken: Vec<PathBuf>,
    omit: Option<&'static str>,
}

impl FakeOpener {
    pub fn broken(mut self, path: impl Into<PathBuf>) -> Self {
        self.broken.push(path.into());
        self
    }

    pub fn without(mut self, symbol: &'static str) -> Self {
        self.omit = Some(symbol);
        self
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl ModuleOpener for FakeOpener {
    fn open(&self, path: &Path) -> nbind_loader::Result<Box<dyn CapabilityModule>> {
        self.opened.lock().unwrap().push(path.to_path_buf());

        if !path.exists() {
            return Err(LoadError::Io(io::ErrorKind::NotFound.into()));
        }
        if self.broken.iter().any(|p| p == path) {
            return Err(LoadError::Io(io::Error::other("invalid ELF header")));
        }

        let mut symbols = symbol_table();
        if let Some(name) = self.omit {
            symbols.remove(name);
        }
        Ok(Box::new(FakeModule {
            origin: path.to_path_buf(),
            symbols,
        }))
    }
}

/// Lay out `<root>/node_modules/@user.tax/rust-<target>/` with its library.
pub fn install_package(root: &Path, target: &str) -> PathBuf {
    let dir = root
        .join("node_modules")
        .join("@user.tax")
        .join(format!("rust-{target}"));
    std::fs::create_dir_all(&dir).unwrap();

    let library = format!("rust.{target}.node");
    std::fs::write(
        dir.join("package.json"),
        format!(r#"{{"name":"@user.tax/rust-{target}","main":"{library}"}}"#),
    )
    .unwrap();
    std::fs::write(dir.join(&library), b"").unwrap();
    dir.join(library)
}
