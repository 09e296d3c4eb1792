use nbind_loader::{LoadError, LoadFailure};
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Platform(#[from] nbind_platform::Error),

    #[error(transparent)]
    Load(#[from] LoadFailure),

    #[error("native binding {} does not export `{name}`: {source}", .origin.display())]
    MissingCapability {
        name: &'static str,
        origin: std::path::PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("cannot locate the loader directory: {0}")]
    LocalDir(#[source] io::Error),
}
