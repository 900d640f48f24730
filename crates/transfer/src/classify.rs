use walk::Entry;

/// Directory-name suffix that switches traversal into bundling: the subtree
/// is re-packed into a single compressed archive instead of being mirrored
/// entry by entry. The remote file produced keeps this suffix in its name.
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// How a visited entry is handled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Class {
    /// Never transferred, in any mode; directories are still descended into.
    Skip,
    /// A directory opening a new archive session.
    ArchiveRoot,
    /// An entry inside the open archive's subtree.
    ArchiveMember,
    /// An ordinary mirrored entry.
    Plain,
}

/// Classifies one visited entry. The rules apply in order: the skip rules
/// trump everything; a directory carrying the archive suffix opens a session
/// only when none is open; while a session is open every entry is a member.
pub(crate) fn classify(entry: &Entry, archiving: bool) -> Class {
    let path = entry.full_path().to_string_lossy();
    if filters::is_skipped(&path) {
        return Class::Skip;
    }
    if !archiving && entry.is_dir() && path.ends_with(ARCHIVE_SUFFIX) {
        return Class::ArchiveRoot;
    }
    if archiving {
        return Class::ArchiveMember;
    }
    Class::Plain
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use walk::Walker;

    fn entries(root: &std::path::Path) -> Vec<Entry> {
        Walker::new(root)
            .expect("walker")
            .map(|e| e.expect("entry"))
            .collect()
    }

    #[test]
    fn skip_trumps_every_mode() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("tree");
        fs::create_dir_all(root.join(".git")).expect("git dir");

        let git = entries(&root)
            .into_iter()
            .find(|e| e.relative_path().ends_with(".git"))
            .expect("git entry");
        assert_eq!(classify(&git, false), Class::Skip);
        assert_eq!(classify(&git, true), Class::Skip);
    }

    #[test]
    fn suffixed_directory_opens_a_session_only_outside_one() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("tree");
        fs::create_dir_all(root.join("pack.tar.gz")).expect("archive dir");

        let pack = entries(&root)
            .into_iter()
            .find(|e| e.relative_path().ends_with("pack.tar.gz"))
            .expect("pack entry");
        assert_eq!(classify(&pack, false), Class::ArchiveRoot);
        assert_eq!(classify(&pack, true), Class::ArchiveMember);
    }

    #[test]
    fn suffixed_file_is_not_an_archive_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("tree");
        fs::create_dir(&root).expect("root");
        fs::write(root.join("release.tar.gz"), b"bytes").expect("file");

        let release = entries(&root)
            .into_iter()
            .find(|e| e.relative_path().ends_with("release.tar.gz"))
            .expect("release entry");
        assert_eq!(classify(&release, false), Class::Plain);
    }
}
