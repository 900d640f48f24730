use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error terminating a traversal, carrying the path that failed.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The walk root could not be inspected.
    #[error("failed to inspect walk root '{path}': {source}")]
    Root {
        /// Root path that failed to provide metadata.
        path: PathBuf,
        /// Underlying operating-system error.
        source: io::Error,
    },
    /// A directory's contents could not be listed.
    #[error("failed to read directory '{path}': {source}")]
    ReadDir {
        /// Directory whose listing failed.
        path: PathBuf,
        /// Underlying operating-system error.
        source: io::Error,
    },
    /// Metadata for a visited entry could not be retrieved.
    #[error("failed to inspect metadata for '{path}': {source}")]
    Metadata {
        /// Entry whose metadata could not be retrieved.
        path: PathBuf,
        /// Underlying operating-system error.
        source: io::Error,
    },
}

impl WalkError {
    /// Returns the filesystem path tied to the failure.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            WalkError::Root { path, .. }
            | WalkError::ReadDir { path, .. }
            | WalkError::Metadata { path, .. } => path,
        }
    }
}
