//! Artifacts shipped next to the loader.

use nbind_platform::TargetId;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Attempt, DylibOpener, LoadStrategy, ModuleOpener, Tier};

/// `<binding>.<target>.node`
pub fn artifact_file_name(binding: &str, target: TargetId) -> String {
    format!("{binding}.{target}.node")
}

/// Loads `<dir>/<binding>.<target>.node` when it exists.
#[derive(Debug, Clone)]
pub struct LocalArtifact<O = DylibOpener> {
    dir: PathBuf,
    binding: String,
    opener: O,
}

impl LocalArtifact {
    pub fn new(dir: impl Into<PathBuf>, binding: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            binding: binding.into(),
            opener: DylibOpener,
        }
    }
}

impl<O> LocalArtifact<O> {
    pub fn with_opener<P: ModuleOpener>(self, opener: P) -> LocalArtifact<P> {
        LocalArtifact {
            dir: self.dir,
            binding: self.binding,
            opener,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, target: TargetId) -> PathBuf {
        self.dir.join(artifact_file_name(&self.binding, target))
    }
}

impl<O: ModuleOpener> LoadStrategy for LocalArtifact<O> {
    fn tier(&self) -> Tier {
        Tier::LocalFile
    }

    fn attempt(&self, target: TargetId) -> Attempt {
        let path = self.path(target);
        let existed = path.exists();
        debug!(path = %path.display(), existed, "checked local artifact");

        if !existed {
            return Attempt::Skipped(format!("{} does not exist", path.display()));
        }
        self.opener.open(&path).into()
    }
}
