//! Errors raised around the calculation engine.
//!
//! The engine itself is total and never fails; these cover input validation,
//! profile storage and JSON decoding.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaspError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Profile already exists at {}; pass --force to overwrite", .0.display())]
    ProfileExists(PathBuf),
}

impl SaspError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SaspError>;
