use std::io::{self, Write};
use std::path::Path;

use ssh2::{ErrorCode, FileStat, Sftp};
use tracing::trace;

use crate::{RemoteFile, RemoteFs};

// SFTP status codes for the two "absent" answers (draft-ietf-secsh-filexfer).
const SSH_FX_NO_SUCH_FILE: i32 = 2;
const SSH_FX_NO_SUCH_PATH: i32 = 10;

/// Remote filesystem backed by a blocking SFTP channel.
pub struct SftpFs {
    sftp: Sftp,
}

impl SftpFs {
    /// Wraps an established SFTP channel.
    #[must_use]
    pub fn new(sftp: Sftp) -> Self {
        Self { sftp }
    }
}

impl RemoteFs for SftpFs {
    fn stat(&self, path: &str) -> io::Result<bool> {
        match self.sftp.stat(Path::new(path)) {
            Ok(_) => Ok(true),
            Err(error) if is_absent(&error) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    fn mkdir(&self, path: &str) -> io::Result<()> {
        trace!(path, "mkdir");
        self.sftp.mkdir(Path::new(path), 0o755).map_err(Into::into)
    }

    fn create(&self, path: &str) -> io::Result<Box<dyn RemoteFile>> {
        trace!(path, "create");
        let file = self.sftp.create(Path::new(path))?;
        Ok(Box::new(SftpFile { file }))
    }
}

fn is_absent(error: &ssh2::Error) -> bool {
    matches!(
        error.code(),
        ErrorCode::SFTP(SSH_FX_NO_SUCH_FILE | SSH_FX_NO_SUCH_PATH)
    )
}

struct SftpFile {
    file: ssh2::File,
}

impl Write for SftpFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl RemoteFile for SftpFile {
    fn set_permissions(&mut self, mode: u32) -> io::Result<()> {
        let stat = FileStat {
            size: None,
            uid: None,
            gid: None,
            perm: Some(mode),
            atime: None,
            mtime: None,
        };
        self.file.setstat(stat).map_err(Into::into)
    }
}
