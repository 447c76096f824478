//! Errors raised at the I/O boundary (dictionary files, configuration files).
//!
//! The completion core itself is total and never returns these: degenerate
//! queries and mutations resolve to empty results or no-ops.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompleterError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CompleterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, CompleterError>;
