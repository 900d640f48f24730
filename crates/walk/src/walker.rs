use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::entry::{Entry, EntryKind};
use crate::error::WalkError;

/// Depth-first iterator over a local tree.
///
/// Yields the root first, then descendants in lexicographic order, each
/// directory's contents fully before the next sibling.
pub struct Walker {
    pending_root: Option<Entry>,
    stack: Vec<DirFrame>,
    finished: bool,
}

impl Walker {
    /// Starts a traversal rooted at `root`.
    ///
    /// Fails immediately when the root cannot be inspected or, for a
    /// directory root, when its contents cannot be listed.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, WalkError> {
        let root = root.as_ref().to_path_buf();
        let metadata = fs::symlink_metadata(&root).map_err(|source| WalkError::Root {
            path: root.clone(),
            source,
        })?;
        let modified = metadata.modified().map_err(|source| WalkError::Metadata {
            path: root.clone(),
            source,
        })?;

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        let mut stack = Vec::new();
        if kind == EntryKind::Directory {
            stack.push(DirFrame::read(root.clone(), PathBuf::new(), 0)?);
        }

        trace!(root = %root.display(), "starting walk");

        Ok(Self {
            pending_root: Some(Entry {
                full_path: root,
                relative_path: PathBuf::new(),
                kind,
                size: metadata.len(),
                modified,
                depth: 0,
            }),
            stack,
            finished: false,
        })
    }

    fn visit(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<Entry, WalkError> {
        let metadata = fs::symlink_metadata(&full_path).map_err(|source| WalkError::Metadata {
            path: full_path.clone(),
            source,
        })?;
        let modified = metadata.modified().map_err(|source| WalkError::Metadata {
            path: full_path.clone(),
            source,
        })?;

        // Symlinks are not followed: anything that is not a directory is
        // handed to the caller as a file-shaped entry.
        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        if kind == EntryKind::Directory {
            let frame = DirFrame::read(full_path.clone(), relative_path.clone(), depth)?;
            self.stack.push(frame);
        }

        Ok(Entry {
            full_path,
            relative_path,
            kind,
            size: metadata.len(),
            modified,
            depth,
        })
    }
}

impl Iterator for Walker {
    type Item = Result<Entry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(root) = self.pending_root.take() {
            return Some(Ok(root));
        }

        loop {
            let frame = self.stack.last_mut()?;
            let Some(name) = frame.names.next() else {
                self.stack.pop();
                continue;
            };

            let full_path = frame.dir.join(&name);
            let relative_path = frame.relative.join(&name);
            let depth = frame.depth + 1;

            return match self.visit(full_path, relative_path, depth) {
                Ok(entry) => Some(Ok(entry)),
                Err(error) => {
                    self.finished = true;
                    Some(Err(error))
                }
            };
        }
    }
}

struct DirFrame {
    dir: PathBuf,
    relative: PathBuf,
    depth: usize,
    names: std::vec::IntoIter<OsString>,
}

impl DirFrame {
    fn read(dir: PathBuf, relative: PathBuf, depth: usize) -> Result<Self, WalkError> {
        let mut names = Vec::new();
        let listing = fs::read_dir(&dir).map_err(|source| WalkError::ReadDir {
            path: dir.clone(),
            source,
        })?;
        for entry in listing {
            let entry = entry.map_err(|source| WalkError::ReadDir {
                path: dir.clone(),
                source,
            })?;
            names.push(entry.file_name());
        }
        names.sort();

        Ok(Self {
            dir,
            relative,
            depth,
            names: names.into_iter(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(walker: Walker) -> Vec<(PathBuf, usize, bool)> {
        walker
            .map(|entry| {
                let entry = entry.expect("walk entry");
                (entry.relative_path().to_path_buf(), entry.depth(), entry.is_dir())
            })
            .collect()
    }

    #[test]
    fn missing_root_fails_up_front() {
        let error = match Walker::new("/nonexistent/walk/root") {
            Ok(_) => panic!("missing root should fail"),
            Err(error) => error,
        };
        assert!(matches!(error, WalkError::Root { .. }));
        assert!(error.path().ends_with("root"));
    }

    #[test]
    fn single_file_root_yields_itself_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("solo.txt");
        fs::write(&file, b"payload").expect("write");

        let mut walker = Walker::new(&file).expect("walker");
        let entry = walker.next().expect("entry").expect("entry ok");
        assert_eq!(entry.full_path(), file);
        assert!(entry.relative_path().as_os_str().is_empty());
        assert_eq!(entry.size(), 7);
        assert_eq!(entry.depth(), 0);
        assert!(walker.next().is_none());
    }

    #[test]
    fn directories_are_listed_lexicographically_and_depth_first() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("tree");
        fs::create_dir(&root).expect("root");
        fs::create_dir(root.join("beta")).expect("beta");
        fs::create_dir(root.join("alpha")).expect("alpha");
        fs::write(root.join("alpha/z.txt"), b"z").expect("z");
        fs::write(root.join("alpha/a.txt"), b"a").expect("a");
        fs::write(root.join("omega.txt"), b"o").expect("omega");

        let walker = Walker::new(&root).expect("walker");
        let seen = collect(walker);
        assert_eq!(
            seen,
            vec![
                (PathBuf::new(), 0, true),
                (PathBuf::from("alpha"), 1, true),
                (PathBuf::from("alpha/a.txt"), 2, false),
                (PathBuf::from("alpha/z.txt"), 2, false),
                (PathBuf::from("beta"), 1, true),
                (PathBuf::from("omega.txt"), 1, false),
            ]
        );
    }

    #[test]
    fn entry_segments_split_the_relative_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("tree");
        fs::create_dir_all(root.join("sub/inner")).expect("dirs");
        fs::write(root.join("sub/inner/file.txt"), b"x").expect("file");

        let walker = Walker::new(&root).expect("walker");
        let deepest = walker
            .map(|e| e.expect("entry"))
            .max_by_key(Entry::depth)
            .expect("deepest");
        assert_eq!(deepest.segments(), vec!["sub", "inner", "file.txt"]);
        assert_eq!(deepest.depth(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_yielded_but_not_descended() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("tree");
        let target = temp.path().join("target");
        fs::create_dir(&root).expect("root");
        fs::create_dir(&target).expect("target");
        fs::write(target.join("inner.txt"), b"data").expect("inner");
        symlink(&target, root.join("link")).expect("symlink");

        let walker = Walker::new(&root).expect("walker");
        let seen = collect(walker);
        assert_eq!(seen, vec![(PathBuf::new(), 0, true), (PathBuf::from("link"), 1, false)]);
    }
}
