//! Plain-mode mirroring, skip rules, and error surfacing.

use std::fs;

use remote::{MemoryFs, RemoteFs};
use transfer::{TransferError, upload};

fn prefix(temp: &tempfile::TempDir) -> String {
    temp.path().to_string_lossy().into_owned()
}

#[test]
fn mirrors_a_tree_byte_for_byte() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("project");
    fs::create_dir_all(root.join("sub")).expect("dirs");
    fs::create_dir(root.join("hollow")).expect("empty dir");
    fs::write(root.join("a.txt"), b"alpha").expect("a");
    fs::write(root.join("sub/b.bin"), [0u8, 1, 2, 3]).expect("b");

    let remote = MemoryFs::new();
    upload(&remote, &prefix(&temp), "project", "deploy/").expect("upload");

    assert_eq!(
        remote.dirs(),
        vec![
            "deploy".to_owned(),
            "deploy/project".to_owned(),
            "deploy/project/hollow".to_owned(),
            "deploy/project/sub".to_owned(),
        ]
    );
    assert_eq!(
        remote.files(),
        vec![
            "deploy/project/a.txt".to_owned(),
            "deploy/project/sub/b.bin".to_owned(),
        ]
    );
    assert_eq!(remote.file_data("deploy/project/a.txt").expect("a"), b"alpha");
    assert_eq!(
        remote.file_data("deploy/project/sub/b.bin").expect("b"),
        vec![0u8, 1, 2, 3]
    );
}

#[test]
fn whole_prefix_transfers_for_empty_and_dot_sources() {
    for source in ["", "."] {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("only.txt"), b"x").expect("file");

        let remote = MemoryFs::new();
        upload(&remote, &prefix(&temp), source, "drop/").expect("upload");
        assert_eq!(remote.files(), vec!["drop/only.txt".to_owned()]);
    }
}

#[test]
fn skip_rules_suppress_transfer_in_every_mode() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("project");
    fs::create_dir_all(root.join(".git")).expect(".git");
    fs::write(root.join(".git/config"), b"[core]").expect("config");
    fs::create_dir_all(root.join("com.git")).expect("com.git");
    fs::write(root.join("com.git/readme"), b"kept").expect("readme");
    fs::write(root.join(".inventory.toml"), b"content = ''").expect("inventory");
    fs::write(root.join("kept.txt"), b"kept").expect("kept");

    let remote = MemoryFs::new();
    upload(&remote, &prefix(&temp), "project", "deploy/").expect("upload");

    assert_eq!(
        remote.files(),
        vec![
            "deploy/project/com.git/readme".to_owned(),
            "deploy/project/kept.txt".to_owned(),
        ]
    );
    assert!(!remote.dirs().iter().any(|d| d.contains(".git") && !d.contains("com.git")));
}

#[test]
fn missing_source_is_reported_before_any_transfer() {
    let temp = tempfile::tempdir().expect("tempdir");
    let remote = MemoryFs::new();
    let error = upload(&remote, &prefix(&temp), "absent", "deploy/").expect_err("missing");
    assert!(matches!(error, TransferError::NotFound { .. }));
    assert!(remote.dirs().is_empty());
    assert!(remote.files().is_empty());
}

#[test]
fn remote_stat_failure_is_fatal_and_distinct_from_absence() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("project");
    fs::create_dir(&root).expect("root");
    fs::write(root.join("a.txt"), b"alpha").expect("a");

    let remote = MemoryFs::new();
    remote.deny_stat("deploy");
    let error = upload(&remote, &prefix(&temp), "project", "deploy/").expect_err("denied");
    match error {
        TransferError::RemoteStat { path, .. } => assert_eq!(path, "deploy"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn pre_existing_ancestors_are_tolerated() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path().join("project");
    fs::create_dir(&root).expect("root");
    fs::write(root.join("a.txt"), b"alpha").expect("a");

    let remote = MemoryFs::new();
    remote.mkdir("deploy").expect("pre-create");
    upload(&remote, &prefix(&temp), "project", "deploy/").expect("upload");
    assert!(remote.stat("deploy/project/a.txt").expect("stat"));
}

#[test]
fn single_file_source_transfers_directly() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("docs")).expect("docs");
    fs::write(temp.path().join("docs/readme.txt"), b"hello").expect("readme");

    let remote = MemoryFs::new();
    upload(&remote, &prefix(&temp), "docs/readme.txt", "deploy/").expect("upload");

    assert_eq!(remote.dirs(), vec!["deploy".to_owned(), "deploy/docs".to_owned()]);
    assert_eq!(
        remote.file_data("deploy/docs/readme.txt").expect("readme"),
        b"hello"
    );
}
