//! End-to-end scenarios across the public fskit API
//!
//! Each test builds a throwaway project root and drives every operation
//! through `ProjectFs` with relative paths.

use assert_fs::prelude::*;
use fskit::{Outcome, ProjectFs, WriteOptions, format_bytes_default};
use fskit_test_utils::TestTree;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn nested_create_write_copy_delete() {
    let _ = fskit::logging::init_with("fskit=debug");
    let tree = TestTree::new();
    let fs = ProjectFs::at(tree.root());

    assert_eq!(fs.make_dir("a/b/c").unwrap(), Outcome::Created);
    fs.write_file("a/b/c/f.txt", "scenario payload", WriteOptions::default())
        .unwrap();

    let report = fs.copy_dir("a2", "a", WriteOptions::overwrite()).unwrap();
    assert_eq!(report.files_copied, 1);
    assert_eq!(tree.read("a2/b/c/f.txt"), tree.read("a/b/c/f.txt"));

    assert_eq!(fs.delete_dir("a").unwrap(), Outcome::Removed);
    tree.assert_not_exists("a");
    tree.assert_exists("a2/b/c/f.txt");
}

#[test]
fn overwrite_flag_across_file_and_directory_ops() {
    let temp = assert_fs::TempDir::new().unwrap();
    let fs = ProjectFs::at(temp.path());
    temp.child("src/config.toml").write_str("v = 2").unwrap();
    temp.child("src/data/blob.bin").write_binary(&[1, 2, 3]).unwrap();
    temp.child("dst/config.toml").write_str("v = 1").unwrap();

    let kept = fs.copy_dir("dst", "src", WriteOptions::keep_existing()).unwrap();
    assert_eq!(kept.files_skipped, 1);
    assert_eq!(kept.files_copied, 1);
    temp.child("dst/config.toml").assert("v = 1");

    let replaced = fs.copy_dir("dst", "src", WriteOptions::overwrite()).unwrap();
    assert_eq!(replaced.files_copied, 2);
    temp.child("dst/config.toml").assert("v = 2");
    temp.child("dst/data/blob.bin")
        .assert(predicate::path::eq_file(temp.child("src/data/blob.bin").path()));
}

#[test]
fn move_then_move_back_round_trips_tree() {
    let tree = TestTree::new();
    tree.file("proj/src/main.txt", "main");
    tree.file("proj/docs/readme.txt", "docs");
    let original = tree.snapshot("proj");
    let fs = ProjectFs::at(tree.root());

    fs.move_dir("archive/proj", "proj", WriteOptions::default())
        .unwrap();
    tree.assert_not_exists("proj");

    fs.move_dir("proj", "archive/proj", WriteOptions::default())
        .unwrap();
    tree.assert_not_exists("archive/proj");
    assert_eq!(tree.snapshot("proj"), original);
}

#[test]
fn report_sizes_of_copied_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let fs = ProjectFs::at(temp.path());
    fs.write_file("big.bin", vec![0u8; 3 * 1024 * 1024], WriteOptions::default())
        .unwrap();

    fs.copy_file("copy.bin", "big.bin", WriteOptions::default())
        .unwrap();

    let len = std::fs::metadata(fs.resolve("copy.bin")).unwrap().len();
    assert_eq!(format_bytes_default(len), "3.00 MB");
}
