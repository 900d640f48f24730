#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! The ferry transfer engine. [`upload`] mirrors a local directory (or a
//! single file) onto a remote filesystem reached through the
//! [`remote::RemoteFs`] capability, re-packing any subtree whose directory
//! name ends in [`ARCHIVE_SUFFIX`] into one compressed tar archive uploaded
//! as a single remote file.
//!
//! # Design
//!
//! - Entries arrive from [`walk::Walker`] in lexicographic depth-first
//!   order; [`Uploader`] classifies each one (skip / archive root / archive
//!   member / plain) and dispatches it.
//! - The transfer mode is an explicit tagged state: `Normal`, or
//!   `Archiving` holding the live [`bundle::Bundle`] session. Sessions are
//!   opened when traversal enters an archive-suffixed directory, and are
//!   finalised and uploaded as soon as traversal leaves that subtree, or at
//!   the end of the walk.
//! - Destination paths are rebased onto the remote destination prefix by
//!   [`DestMap`], forward-slash joined on every platform. Archive member
//!   paths are rebased a second time, relative to the archive root itself.
//!
//! # Invariants
//!
//! - Remote directories are created before any file beneath them is
//!   transferred.
//! - Skip-rule matches are never transferred, in any mode.
//! - Archive members are byte-verified against the size captured at
//!   enumeration time; a mismatch aborts the walk.
//! - The first error aborts the whole invocation with the offending path;
//!   there is no retry and no partial-success reporting.
//!
//! # Examples
//!
//! Mirror a small tree into an in-memory remote:
//!
//! ```
//! use remote::MemoryFs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("site");
//! std::fs::create_dir(&root)?;
//! std::fs::write(root.join("index.html"), b"<html>")?;
//!
//! let fs = MemoryFs::new();
//! transfer::upload(&fs, &temp.path().to_string_lossy(), "site", "deploy/")?;
//! assert_eq!(fs.files(), vec!["deploy/site/index.html".to_owned()]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod classify;
mod context;
mod dest;
mod error;
mod ops;
mod uploader;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use remote::RemoteFs;
use tracing::debug;
use walk::Walker;

pub use classify::ARCHIVE_SUFFIX;
pub use dest::DestMap;
pub use error::TransferError;
pub use uploader::Uploader;

/// Mirrors `source` (resolved under `source_prefix`) onto the remote
/// filesystem below `destination`.
///
/// A `source` of `""` or `"."` transfers the entire prefix. A directory
/// source walks the whole subtree through the [`Uploader`] state machine; a
/// file source is transferred directly after its remote parent directory is
/// ensured. The resolved source missing locally is a [`TransferError::NotFound`]
/// reported before any transfer begins.
pub fn upload(
    remote: &dyn RemoteFs,
    source_prefix: &str,
    source: &str,
    destination: &str,
) -> Result<(), TransferError> {
    let source = if source == "." { "" } else { source };
    let full_source = if source.is_empty() {
        source_prefix.to_owned()
    } else {
        format!("{source_prefix}/{source}")
    };
    let full_destination = format!("{destination}{source}");
    debug!(from = %full_source, to = %full_destination, "upload requested");

    let metadata = match fs::metadata(&full_source) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(TransferError::NotFound {
                path: PathBuf::from(full_source),
            });
        }
        Err(error) => {
            return Err(TransferError::LocalRead {
                path: PathBuf::from(full_source),
                source: error,
            });
        }
    };

    if metadata.is_dir() {
        ops::ensure_dir(remote, &full_destination)?;
        let walker = Walker::new(&full_source)?;
        Uploader::new(remote, DestMap::new(full_destination)).run(walker)
    } else {
        let parent = full_destination
            .rsplit_once('/')
            .map_or("", |(dir, _)| dir);
        ops::ensure_dir(remote, parent)?;
        ops::upload_file(remote, Path::new(&full_source), &full_destination).map(|_| ())
    }
}
