//! Loaded capability modules.

use libloading::Library;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{LoadError, Result};

/// Untyped exported function. Callers cast it to the signature the module
/// contract assigns to the name.
pub type RawSymbol = unsafe extern "C" fn();

/// An opaque loaded unit that exports named functions.
///
/// Symbols stay valid for as long as the module is alive.
pub trait CapabilityModule: fmt::Debug + Send + Sync {
    /// Where the module was loaded from.
    fn origin(&self) -> &Path;

    fn symbol(&self, name: &str) -> Result<RawSymbol>;
}

/// Turns a path into a loaded module.
pub trait ModuleOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn CapabilityModule>>;
}

/// A dynamic library mapped into the process.
#[derive(Debug)]
pub struct NativeLibrary {
    path: PathBuf,
    library: Library,
}

impl NativeLibrary {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // SAFETY: loading runs the library's initializers; prebuilt bindings
        // are trusted to have none with side effects on this process.
        let library = unsafe { Library::new(path) }.map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "mapped native library");
        Ok(Self {
            path: path.to_path_buf(),
            library,
        })
    }
}

impl CapabilityModule for NativeLibrary {
    fn origin(&self) -> &Path {
        &self.path
    }

    fn symbol(&self, name: &str) -> Result<RawSymbol> {
        // SAFETY: the symbol is only exposed as an untyped pointer; its real
        // signature is applied by the caller.
        let symbol = unsafe { self.library.get::<RawSymbol>(name.as_bytes()) }.map_err(|err| {
            LoadError::Symbol {
                name: name.to_string(),
                path: self.path.clone(),
                reason: err.to_string(),
            }
        })?;
        Ok(*symbol)
    }
}

/// Opens paths with the platform dynamic loader.
#[derive(Debug, Clone, Copy, Default)]
pub struct DylibOpener;

impl ModuleOpener for DylibOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn CapabilityModule>> {
        Ok(Box::new(NativeLibrary::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_library() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.node");

        let err = NativeLibrary::open(&path).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("absent.node"));
    }

    #[test]
    fn test_open_rejects_non_library() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rust.linux-x64-gnu.node");
        std::fs::write(&path, b"not a shared object").unwrap();

        let err = DylibOpener.open(&path).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
