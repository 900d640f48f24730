#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `bundle` owns the in-memory archive session the upload engine opens when
//! traversal enters an archive-suffixed directory. File entries accumulate
//! into a tar stream nested inside a gzip encoder; finalisation closes the
//! framing layer before the compression layer and hands back the complete
//! byte buffer for upload as a single remote file.
//!
//! The archive format has no first-class directory nodes: directories inside
//! the bundled subtree contribute no entry, their existence is implied by
//! member paths.
//!
//! # Invariants
//!
//! - Member paths are stored with forward-slash separators, relative to the
//!   bundled subtree's root.
//! - [`Bundle::finish`] consumes the session; a bundle that errored is
//!   dropped whole, never uploaded.

use std::time::{SystemTime, UNIX_EPOCH};

use flate2::Compression;
use flate2::write::GzEncoder;
use thiserror::Error;

/// Error raised while appending to or finalising an archive session.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Writing a member's header or payload into the stream failed.
    #[error("could not write '{name}' into the archive: {source}")]
    Append {
        /// Member path inside the archive.
        name: String,
        /// Underlying stream error.
        source: std::io::Error,
    },
    /// Closing the framing or compression layer failed.
    #[error("could not finalize archive stream for '{destination}': {source}")]
    Finish {
        /// Remote destination the archive was intended for.
        destination: String,
        /// Underlying stream error.
        source: std::io::Error,
    },
}

/// An in-flight tar.gz archive accumulating file entries in memory.
pub struct Bundle {
    destination: String,
    builder: tar::Builder<GzEncoder<Vec<u8>>>,
}

impl Bundle {
    /// Opens a new session destined for the remote path `destination`.
    ///
    /// The destination keeps the archive suffix of the directory that
    /// triggered the session; it is where [`Bundle::finish`]'s buffer will
    /// be uploaded.
    #[must_use]
    pub fn new<S: Into<String>>(destination: S) -> Self {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        Self {
            destination: destination.into(),
            builder: tar::Builder::new(encoder),
        }
    }

    /// Returns the remote path the finished archive uploads to.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Appends one file entry.
    ///
    /// `name` is the member path relative to the bundled subtree's root,
    /// already forward-slash joined. The header carries the payload size and
    /// the modification time observed when the file was enumerated.
    pub fn append(
        &mut self,
        name: &str,
        modified: SystemTime,
        data: &[u8],
    ) -> Result<(), BundleError> {
        let mtime = modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mtime(mtime);
        header.set_mode(0o644);

        self.builder
            .append_data(&mut header, name, data)
            .map_err(|source| BundleError::Append {
                name: name.to_owned(),
                source,
            })
    }

    /// Finalises the session and returns the complete tar.gz buffer.
    ///
    /// The tar framing is closed first, then the gzip encoder; reversing
    /// that order would truncate the compressed trailer and corrupt the
    /// archive.
    pub fn finish(self) -> Result<Vec<u8>, BundleError> {
        let destination = self.destination;
        let encoder = self
            .builder
            .into_inner()
            .map_err(|source| BundleError::Finish {
                destination: destination.clone(),
                source,
            })?;
        encoder.finish().map_err(|source| BundleError::Finish {
            destination,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn unpack(buffer: &[u8]) -> Vec<(String, Vec<u8>, u64)> {
        let mut archive = tar::Archive::new(GzDecoder::new(buffer));
        archive
            .entries()
            .expect("archive entries")
            .map(|entry| {
                let mut entry = entry.expect("entry");
                let name = entry
                    .path()
                    .expect("entry path")
                    .to_string_lossy()
                    .into_owned();
                let mtime = entry.header().mtime().expect("mtime");
                let mut data = Vec::new();
                entry.read_to_end(&mut data).expect("payload");
                (name, data, mtime)
            })
            .collect()
    }

    #[test]
    fn round_trips_members_with_nested_paths() {
        let stamp = UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        let mut bundle = Bundle::new("deploy/payload.tar.gz");
        bundle.append("a", stamp, b"alpha").expect("append a");
        bundle.append("sub/b", stamp, b"beta").expect("append b");
        let buffer = bundle.finish().expect("finish");

        let members = unpack(&buffer);
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].0, "a");
        assert_eq!(members[0].1, b"alpha");
        assert_eq!(members[0].2, 1_700_000_000);
        assert_eq!(members[1].0, "sub/b");
        assert_eq!(members[1].1, b"beta");
    }

    #[test]
    fn empty_session_finalises_to_a_valid_archive() {
        let bundle = Bundle::new("deploy/empty.tar.gz");
        let buffer = bundle.finish().expect("finish");
        assert!(unpack(&buffer).is_empty());
    }

    #[test]
    fn destination_is_recorded_verbatim() {
        let bundle = Bundle::new("srv/app/tools.tar.gz");
        assert_eq!(bundle.destination(), "srv/app/tools.tar.gz");
    }
}
