use thiserror::Error;

use crate::Os;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported OS: {os}, architecture: {arch}")]
    UnsupportedOs { os: String, arch: String },

    #[error("Unsupported architecture on {os}: {arch}")]
    UnsupportedArch { os: Os, arch: String },

    #[error("unknown target identifier: {0}")]
    UnknownTarget(String),
}
