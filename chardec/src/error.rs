//! Command-line error type.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a `chardec` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("{path}: {source}")]
    File { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid config {path}: {source}")]
    Config { path: PathBuf, source: toml::de::Error },

    #[error("invalid state file {path}: {source}")]
    State { path: PathBuf, source: toml::de::Error },

    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Decode(#[from] chardec_core::Error),
}
