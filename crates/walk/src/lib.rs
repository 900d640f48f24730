#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` enumerates a local tree in depth-first order for the ferry upload
//! engine. Directory contents are sorted lexicographically before they are
//! yielded, so the sequence of entries is deterministic regardless of the
//! underlying filesystem's iteration order. Each [`Entry`] snapshots the
//! metadata the upload engine relies on (kind, byte size, modification time)
//! at enumeration time; the transfer layer compares that snapshot against
//! what it later reads from disk to detect files mutated mid-walk.
//!
//! # Design
//!
//! - [`Walker`] implements [`Iterator`] over `Result<Entry, WalkError>`. The
//!   root itself is yielded first (depth 0, empty relative path), then its
//!   descendants, each directory's contents fully before the next sibling.
//! - Symbolic links are yielded as ordinary non-directory entries and never
//!   followed; whether their targets are readable is the caller's concern.
//! - The first error terminates the iteration; the walker yields it once and
//!   then fuses.
//!
//! # Errors
//!
//! [`WalkError`] captures the offending path alongside the underlying
//! [`std::io::Error`] so callers can surface actionable diagnostics without
//! pattern-matching on variants.
//!
//! # Examples
//!
//! ```
//! use walk::Walker;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("tree");
//! std::fs::create_dir(&root)?;
//! std::fs::write(root.join("leaf.txt"), b"data")?;
//!
//! let relative: Vec<_> = Walker::new(&root)?
//!     .map(|entry| entry.map(|e| e.relative_path().to_path_buf()))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(relative.len(), 2);
//! assert_eq!(relative[1], std::path::PathBuf::from("leaf.txt"));
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod entry;
mod error;
mod walker;

pub use entry::{Entry, EntryKind};
pub use error::WalkError;
pub use walker::Walker;
