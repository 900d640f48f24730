use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use remote::RemoteFs;
use tracing::{debug, info};

use crate::error::TransferError;

/// Permission mode stamped onto remote files the name heuristics mark as
/// executable.
const EXECUTABLE_MODE: u32 = 0o764;

/// Ensures the remote directory `destination` and its ancestors exist.
///
/// The empty path and the `./` marker are the remote working directory and
/// need no creation. Otherwise every prefix of the path is checked shortest
/// to longest and created when absent, which makes the operation idempotent
/// and tolerant of partially pre-existing ancestor chains. A stat failure
/// that is not a not-found answer aborts; absence is the only condition
/// that may be repaired by creating.
pub(crate) fn ensure_dir(remote: &dyn RemoteFs, destination: &str) -> Result<(), TransferError> {
    if destination.is_empty() || destination == "./" {
        return Ok(());
    }
    debug!(path = destination, "ensuring remote directory");

    let segments: Vec<&str> = destination.split('/').collect();
    for index in 0..segments.len() {
        if segments[index].is_empty() || segments[index] == "." {
            continue;
        }
        let prefix = segments[..=index].join("/");
        let exists = remote.stat(&prefix).map_err(|source| TransferError::RemoteStat {
            path: prefix.clone(),
            source,
        })?;
        if !exists {
            remote
                .mkdir(&prefix)
                .map_err(|source| TransferError::RemoteCreate {
                    path: prefix.clone(),
                    source,
                })?;
        }
    }
    Ok(())
}

/// Uploads one local file directly to `destination`.
///
/// Filenames ending in `py` or `sh` mark the remote file executable; a name
/// ending in `-x` marks it executable and the two-character suffix is
/// stripped from the remote name before creation. Returns the number of
/// bytes streamed (observability only, not a validation input).
pub(crate) fn upload_file(
    remote: &dyn RemoteFs,
    source: &Path,
    destination: &str,
) -> Result<u64, TransferError> {
    let mut destination = destination.to_owned();
    let mut executable = false;
    if destination.ends_with("py") || destination.ends_with("sh") {
        executable = true;
    } else if destination.ends_with("-x") {
        executable = true;
        destination.truncate(destination.len() - 2);
    }

    let mut reader = File::open(source).map_err(|error| TransferError::LocalRead {
        path: source.to_path_buf(),
        source: error,
    })?;
    let mut handle = remote
        .create(&destination)
        .map_err(|source| TransferError::RemoteCreate {
            path: destination.clone(),
            source,
        })?;

    let written = io::copy(&mut reader, &mut handle).map_err(|source| {
        TransferError::RemoteWrite {
            path: destination.clone(),
            source,
        }
    })?;
    handle.flush().map_err(|source| TransferError::RemoteWrite {
        path: destination.clone(),
        source,
    })?;

    if executable {
        handle
            .set_permissions(EXECUTABLE_MODE)
            .map_err(|source| TransferError::RemoteWrite {
                path: destination.clone(),
                source,
            })?;
    }

    info!(path = %destination, bytes = written, "transmitted");
    Ok(written)
}

/// Uploads an already-built byte buffer as one remote file.
///
/// Used for finalised archive sessions; no name heuristics apply, the
/// destination is taken verbatim.
pub(crate) fn upload_buffer(
    remote: &dyn RemoteFs,
    data: &[u8],
    destination: &str,
) -> Result<(), TransferError> {
    let mut handle = remote
        .create(destination)
        .map_err(|source| TransferError::RemoteCreate {
            path: destination.to_owned(),
            source,
        })?;
    handle
        .write_all(data)
        .and_then(|()| handle.flush())
        .map_err(|source| TransferError::RemoteWrite {
            path: destination.to_owned(),
            source,
        })?;

    info!(path = destination, bytes = data.len(), "transmitted");
    Ok(())
}
