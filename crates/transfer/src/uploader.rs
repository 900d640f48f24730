use std::fs;
use std::mem;

use bundle::Bundle;
use remote::RemoteFs;
use tracing::{debug, trace};
use walk::{Entry, WalkError};

use crate::classify::{Class, classify};
use crate::context::Context;
use crate::dest::DestMap;
use crate::error::TransferError;
use crate::ops;

/// The traversal state machine: dispatches every visited entry to direct
/// transfer, remote directory creation, or the open archive session.
pub struct Uploader<'a> {
    remote: &'a dyn RemoteFs,
    map: DestMap,
    context: Context,
    mode: Mode,
}

/// Transfer mode, switched per subtree.
enum Mode {
    Normal,
    Archiving(Session),
}

struct Session {
    bundle: Bundle,
    /// Depth (relative segment count) of the archive root; member paths are
    /// rebased past this many segments, and traversal leaving for this depth
    /// or above closes the session.
    open_depth: usize,
}

impl<'a> Uploader<'a> {
    /// Creates a state machine writing through `remote` with destinations
    /// computed by `map`.
    #[must_use]
    pub fn new(remote: &'a dyn RemoteFs, map: DestMap) -> Self {
        Self {
            remote,
            map,
            context: Context::default(),
            mode: Mode::Normal,
        }
    }

    /// Drives the machine over a depth-first entry sequence.
    ///
    /// The first error aborts the walk; an archive still open when the
    /// sequence ends is finalised and uploaded before success is reported.
    pub fn run<I>(mut self, entries: I) -> Result<(), TransferError>
    where
        I: IntoIterator<Item = Result<Entry, WalkError>>,
    {
        for entry in entries {
            let entry = entry?;
            self.visit(&entry)?;
        }
        if let Mode::Archiving(session) = mem::replace(&mut self.mode, Mode::Normal) {
            self.close_session(session)?;
        }
        Ok(())
    }

    fn visit(&mut self, entry: &Entry) -> Result<(), TransferError> {
        // The skip rules come before any bookkeeping: a skipped entry
        // neither closes an open session nor advances the walk context.
        if classify(entry, self.archiving()) == Class::Skip {
            trace!(path = %entry.full_path().display(), "skipped");
            return Ok(());
        }

        // Traversal leaving the open archive's subtree finalises and
        // uploads it before the new entry is handled under the reverted
        // mode, so a sibling archive-suffixed directory opens a session of
        // its own.
        if let Some(session) = self.take_session_if_departed(entry.depth()) {
            self.close_session(session)?;
        }

        let segments = entry.segments();
        self.context.advance(&segments);

        match classify(entry, self.archiving()) {
            // Mode-independent and decided above.
            Class::Skip => Ok(()),
            Class::ArchiveRoot => {
                let destination = self.map.remote_path(&segments);
                let destination = destination.trim_end_matches('/').to_owned();
                debug!(destination = %destination, "bundling subtree");
                self.mode = Mode::Archiving(Session {
                    bundle: Bundle::new(destination),
                    open_depth: entry.depth(),
                });
                Ok(())
            }
            Class::ArchiveMember => {
                if entry.is_dir() {
                    // The archive format has no directory nodes; descending
                    // into the directory is all that is needed.
                    return Ok(());
                }
                self.append_member(entry, &segments)
            }
            Class::Plain => {
                if entry.is_dir() {
                    ops::ensure_dir(self.remote, &self.map.remote_path(&segments))
                } else {
                    ops::upload_file(self.remote, entry.full_path(), &self.map.remote_path(&segments))
                        .map(|_| ())
                }
            }
        }
    }

    fn append_member(&mut self, entry: &Entry, segments: &[String]) -> Result<(), TransferError> {
        let data = fs::read(entry.full_path()).map_err(|source| TransferError::LocalRead {
            path: entry.full_path().to_path_buf(),
            source,
        })?;
        // Guard against a file mutated between enumeration and read: the
        // sizes must agree or the walk aborts.
        if data.len() as u64 != entry.size() {
            return Err(TransferError::SizeMismatch {
                path: entry.full_path().to_path_buf(),
                expected: entry.size(),
                actual: data.len() as u64,
            });
        }

        if let Mode::Archiving(session) = &mut self.mode {
            let member = segments[session.open_depth..].join("/");
            session.bundle.append(&member, entry.modified(), &data)?;
        }
        Ok(())
    }

    fn take_session_if_departed(&mut self, depth: usize) -> Option<Session> {
        let departed = matches!(&self.mode, Mode::Archiving(session) if depth <= session.open_depth);
        if !departed {
            return None;
        }
        match mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Archiving(session) => Some(session),
            Mode::Normal => None,
        }
    }

    fn close_session(&self, session: Session) -> Result<(), TransferError> {
        let destination = session.bundle.destination().to_owned();
        debug!(destination = %destination, "closing bundle");
        let buffer = session.bundle.finish()?;
        ops::upload_buffer(self.remote, &buffer, &destination)
    }

    fn archiving(&self) -> bool {
        matches!(self.mode, Mode::Archiving(_))
    }
}
