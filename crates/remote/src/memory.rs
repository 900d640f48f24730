use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::{RemoteFile, RemoteFs};

/// In-memory remote filesystem used to exercise the upload engine in tests.
///
/// Paths are normalised on every call: empty and `.` segments are dropped,
/// so `./deploy/app` and `deploy/app` name the same node and `.` is the
/// always-existing root. Clones share the same tree.
#[derive(Clone, Default)]
pub struct MemoryFs {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, FileRecord>,
    denied_stats: BTreeSet<String>,
}

#[derive(Default)]
struct FileRecord {
    data: Vec<u8>,
    mode: Option<u32>,
}

impl MemoryFs {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `stat` fail with `PermissionDenied` for the given path,
    /// simulating a remote failure that is not a not-found answer.
    pub fn deny_stat(&self, path: &str) {
        let path = normalize(path);
        self.lock().denied_stats.insert(path);
    }

    /// Returns every directory created so far, in sorted order.
    #[must_use]
    pub fn dirs(&self) -> Vec<String> {
        self.lock().dirs.iter().cloned().collect()
    }

    /// Returns every file created so far, in sorted order.
    #[must_use]
    pub fn files(&self) -> Vec<String> {
        self.lock().files.keys().cloned().collect()
    }

    /// Returns the bytes written to `path`, if the file exists.
    #[must_use]
    pub fn file_data(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().files.get(&normalize(path)).map(|f| f.data.clone())
    }

    /// Returns the permission mode stamped onto `path`, if any.
    #[must_use]
    pub fn file_mode(&self, path: &str) -> Option<u32> {
        self.lock().files.get(&normalize(path)).and_then(|f| f.mode)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl RemoteFs for MemoryFs {
    fn stat(&self, path: &str) -> io::Result<bool> {
        let path = normalize(path);
        let inner = self.lock();
        if inner.denied_stats.contains(&path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("stat denied for '{path}'"),
            ));
        }
        if path.is_empty() {
            return Ok(true);
        }
        Ok(inner.dirs.contains(&path) || inner.files.contains_key(&path))
    }

    fn mkdir(&self, path: &str) -> io::Result<()> {
        let path = normalize(path);
        let mut inner = self.lock();
        if path.is_empty() || inner.dirs.contains(&path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("directory '{path}' already exists"),
            ));
        }
        if let Some(parent) = parent_of(&path)
            && !inner.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent of '{path}' does not exist"),
            ));
        }
        inner.dirs.insert(path);
        Ok(())
    }

    fn create(&self, path: &str) -> io::Result<Box<dyn RemoteFile>> {
        let path = normalize(path);
        let mut inner = self.lock();
        if path.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot create a file at the root",
            ));
        }
        if let Some(parent) = parent_of(&path)
            && !inner.dirs.contains(parent)
        {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent of '{path}' does not exist"),
            ));
        }
        inner.files.insert(path.clone(), FileRecord::default());
        Ok(Box::new(MemoryFile {
            inner: Arc::clone(&self.inner),
            path,
        }))
    }
}

struct MemoryFile {
    inner: Arc<Mutex<Inner>>,
    path: String,
}

impl MemoryFile {
    fn with_record<R>(&mut self, apply: impl FnOnce(&mut FileRecord) -> R) -> io::Result<R> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner
            .files
            .get_mut(&self.path)
            .map(apply)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file vanished remotely"))
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_record(|record| {
            record.data.extend_from_slice(buf);
            buf.len()
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RemoteFile for MemoryFile {
    fn set_permissions(&mut self, mode: u32) -> io::Result<()> {
        self.with_record(|record| {
            record.mode = Some(mode);
        })
    }
}

fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn parent_of(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}
