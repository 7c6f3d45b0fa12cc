//! Error types for loading guide documents

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a guide
#[derive(Debug, Error)]
pub enum GuideError {
    /// The guide file could not be read
    #[error("Failed to read guide {path:?}: {source}")]
    Read {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Two module cards resolved to the same identifier
    #[error("Duplicate module identifier '{0}'")]
    DuplicateModule(String),
}
