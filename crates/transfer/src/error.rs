use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure of an upload invocation.
///
/// Every variant names the path that failed; the first error unwinds the
/// whole walk, there is no retry policy and no partial-success reporting.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The requested source path does not exist locally.
    #[error("source '{path}' does not exist")]
    NotFound {
        /// The resolved source path.
        path: PathBuf,
    },

    /// Local tree enumeration failed.
    #[error(transparent)]
    Walk(#[from] walk::WalkError),

    /// A remote stat failed for a reason other than absence.
    #[error("failed to stat remote path '{path}': {source}")]
    RemoteStat {
        /// The remote path being checked.
        path: String,
        /// Underlying capability error.
        source: io::Error,
    },

    /// Remote directory or file creation failed.
    #[error("failed to create remote path '{path}': {source}")]
    RemoteCreate {
        /// The remote path being created.
        path: String,
        /// Underlying capability error.
        source: io::Error,
    },

    /// Streaming bytes or stamping permissions through a remote handle failed.
    #[error("failed to write remote file '{path}': {source}")]
    RemoteWrite {
        /// The remote file being written.
        path: String,
        /// Underlying capability error.
        source: io::Error,
    },

    /// A local file could not be opened or read.
    #[error("failed to read local file '{path}': {source}")]
    LocalRead {
        /// The local file that failed.
        path: PathBuf,
        /// Underlying operating-system error.
        source: io::Error,
    },

    /// An archive member's bytes differed from the size captured when the
    /// entry was enumerated: a torn read, never retried.
    #[error("size of '{path}' changed during transfer: read {actual} bytes, enumerated {expected}")]
    SizeMismatch {
        /// The local file whose size changed.
        path: PathBuf,
        /// Byte size recorded at enumeration time.
        expected: u64,
        /// Byte count actually read.
        actual: u64,
    },

    /// Writing into the in-flight archive failed; the partial archive is
    /// discarded, never uploaded.
    #[error(transparent)]
    Archive(#[from] bundle::BundleError),
}
