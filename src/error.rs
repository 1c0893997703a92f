//! Error types for the record stores

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in {} at line {line}: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("No task at position {index} (table has {len})")]
    NoSuchTask { index: usize, len: usize },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Standard input was closed while a prompt was waiting for a reply
#[derive(Error, Debug)]
#[error("Input closed")]
pub struct InputClosed;

pub type Result<T> = std::result::Result<T, StoreError>;
