//! Per-target fallback packages installed by the host package manager.

use nbind_platform::TargetId;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{
    Attempt, DylibOpener, LoadError, LoadStrategy, ModuleOpener, Result, Tier, artifact_file_name,
};

const MODULES_DIR: &str = "node_modules";
const MANIFEST: &str = "package.json";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    main: Option<String>,
}

/// Loads the library of the package `<scope>/<prefix>-<target>`.
///
/// Packages are looked up in the explicit roots first, then in every
/// `node_modules` directory from the base directory up to the filesystem
/// root. The library inside the package is its manifest's `main` entry, or
/// `<binding>.<target>.node` without one.
#[derive(Debug, Clone)]
pub struct FallbackPackage<O = DylibOpener> {
    base_dir: PathBuf,
    scope: String,
    prefix: String,
    binding: String,
    roots: Vec<PathBuf>,
    opener: O,
}

impl FallbackPackage {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        scope: impl Into<String>,
        prefix: impl Into<String>,
        binding: impl Into<String>,
    ) -> Self {
        Self {
            base_dir: base_dir.into(),
            scope: scope.into(),
            prefix: prefix.into(),
            binding: binding.into(),
            roots: Vec::new(),
            opener: DylibOpener,
        }
    }
}

impl<O> FallbackPackage<O> {
    pub fn with_opener<P: ModuleOpener>(self, opener: P) -> FallbackPackage<P> {
        FallbackPackage {
            base_dir: self.base_dir,
            scope: self.scope,
            prefix: self.prefix,
            binding: self.binding,
            roots: self.roots,
            opener,
        }
    }

    /// Search `root` before the `node_modules` ancestry.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    pub fn roots(mut self, roots: impl IntoIterator<Item = PathBuf>) -> Self {
        self.roots.extend(roots);
        self
    }

    /// `@user.tax/rust-linux-x64-gnu`
    pub fn package_name(&self, target: TargetId) -> String {
        let package = self.package_dir_name(target);
        if self.scope.is_empty() {
            package
        } else {
            format!("{}/{package}", self.scope)
        }
    }

    fn package_dir_name(&self, target: TargetId) -> String {
        format!("{}-{target}", self.prefix)
    }

    pub fn search_roots(&self) -> Vec<PathBuf> {
        let ancestry = self
            .base_dir
            .ancestors()
            .filter(|dir| dir.file_name().is_none_or(|name| name != MODULES_DIR))
            .map(|dir| dir.join(MODULES_DIR));

        self.roots.iter().cloned().chain(ancestry).collect()
    }

    /// Path of the library inside the first matching package.
    pub fn locate(&self, target: TargetId) -> Result<PathBuf> {
        let roots = self.search_roots();

        for root in &roots {
            let mut dir = root.clone();
            if !self.scope.is_empty() {
                dir.push(&self.scope);
            }
            dir.push(self.package_dir_name(target));

            if dir.is_dir() {
                debug!(package = %dir.display(), "found fallback package");
                return self.entry_point(&dir, target);
            }
        }

        let searched = roots
            .iter()
            .map(|r| r.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(LoadError::PackageNotFound {
            name: self.package_name(target),
            searched,
        })
    }

    fn entry_point(&self, dir: &Path, target: TargetId) -> Result<PathBuf> {
        let manifest_path = dir.join(MANIFEST);
        let manifest = match std::fs::read(&manifest_path) {
            Ok(bytes) => {
                serde_json::from_slice::<Manifest>(&bytes).map_err(|source| LoadError::Manifest {
                    path: manifest_path.clone(),
                    source,
                })?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Manifest::default(),
            Err(err) => return Err(err.into()),
        };

        let file = manifest
            .main
            .unwrap_or_else(|| artifact_file_name(&self.binding, target));
        Ok(dir.join(file))
    }
}

impl<O: ModuleOpener> LoadStrategy for FallbackPackage<O> {
    fn tier(&self) -> Tier {
        Tier::FallbackPackage
    }

    fn attempt(&self, target: TargetId) -> Attempt {
        match self.locate(target) {
            Ok(path) => self.opener.open(&path).into(),
            Err(err) => Attempt::Failed(err),
        }
    }
}
