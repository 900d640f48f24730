#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! The remote-filesystem capability the ferry upload engine writes through.
//! The engine never talks to a concrete transport; it consumes the minimal
//! object-safe surface defined here: existence checks, single-level
//! directory creation, and writable file handles that accept a permission
//! stamp. Two implementations ship with the crate:
//!
//! - [`SftpFs`], backed by a blocking libssh2 SFTP channel, used by the CLI;
//! - [`MemoryFs`], an in-memory tree with inspection helpers, used by the
//!   behaviour tests of the upload engine.
//!
//! # Errors
//!
//! The capability speaks [`std::io::Result`] so backends and fakes share one
//! error currency. `stat` folds the ordinary "no such path" answer into
//! `Ok(false)`; an `Err` from `stat` therefore always signals a real failure
//! (permission denied, broken channel), which callers must treat as fatal
//! rather than as an invitation to create the path.

mod memory;
mod sftp;

use std::io::{self, Write};

pub use memory::MemoryFs;
pub use sftp::SftpFs;

/// A writable remote file handle.
pub trait RemoteFile: Write {
    /// Applies a permission mode to the file after its bytes are written.
    fn set_permissions(&mut self, mode: u32) -> io::Result<()>;
}

/// Minimal remote-filesystem surface: stat, mkdir, create.
///
/// `mkdir` creates a single level and fails when the parent is missing;
/// callers create ancestor chains shortest-prefix-first.
pub trait RemoteFs {
    /// Reports whether `path` exists remotely.
    ///
    /// `Ok(false)` means definitively absent. Any other failure is returned
    /// as an error and must not be treated as absence.
    fn stat(&self, path: &str) -> io::Result<bool>;

    /// Creates the directory `path`; the parent must already exist.
    fn mkdir(&self, path: &str) -> io::Result<()>;

    /// Creates (or truncates) the file `path` and returns a write handle.
    fn create(&self, path: &str) -> io::Result<Box<dyn RemoteFile>>;
}
