use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Distinguishes the two entry shapes the upload engine dispatches on.
///
/// Symbolic links are reported as [`EntryKind::File`]; the walker never
/// follows them, and reading one later resolves to its target's bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    /// A regular file (or anything else that is not a directory).
    File,
    /// A directory whose contents the walker descends into.
    Directory,
}

/// A node visited during traversal, with metadata frozen at enumeration time.
#[derive(Clone, Debug)]
pub struct Entry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) kind: EntryKind,
    pub(crate) size: u64,
    pub(crate) modified: SystemTime,
    pub(crate) depth: usize,
}

impl Entry {
    /// Returns the absolute path of the entry.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Returns the path relative to the walk root (empty for the root).
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Returns the relative path split into ordered segments.
    ///
    /// Segments are produced with lossy UTF-8 conversion; the upload engine
    /// joins them with forward slashes when computing remote destinations,
    /// independent of the local separator convention.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        self.relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    }

    /// Reports whether the entry is a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the byte size recorded when the entry was enumerated.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the modification time recorded when the entry was enumerated.
    #[must_use]
    pub const fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Reports the depth relative to the walk root (root is `0`).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}
