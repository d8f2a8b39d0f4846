//! Error types for the address extractor and reporter

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning, caching or writing output
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to parse a message header block
    #[error("Failed to parse message headers: {0}")]
    Parse(String),

    /// Filesystem access failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cache document could not be read or written as JSON
    #[error("Invalid cache file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for extractor and reporter operations
pub type Result<T> = std::result::Result<T, Error>;
