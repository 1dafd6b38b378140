//! The process-wide root and the free-function API bound to it
//!
//! Lives in its own test binary because the root can only be set once
//! per process.

use fskit::{
    Error, Outcome, WriteOptions, copy_dir, copy_file, delete_dir, delete_file, init_root,
    make_dir, move_dir, move_file, project_root, resolve_path, write_file,
};
use fskit_test_utils::TestTree;

#[test]
fn free_functions_resolve_against_global_root() {
    let tree = TestTree::new();
    let root = init_root(tree.root()).unwrap();
    assert_eq!(root.as_path(), tree.root());
    assert_eq!(project_root().as_path(), tree.root());
    assert!(matches!(
        init_root("/elsewhere").unwrap_err(),
        Error::RootAlreadySet { .. }
    ));

    let resolved = resolve_path("a/b");
    assert_eq!(resolved, tree.path("a/b"));
    assert_eq!(resolve_path(&resolved), resolved);

    assert_eq!(make_dir("a/b").unwrap(), Outcome::Created);
    assert_eq!(
        write_file("a/b/f.txt", "global", WriteOptions::default()).unwrap(),
        Outcome::Written
    );
    assert_eq!(
        copy_file("a/b/g.txt", "a/b/f.txt", WriteOptions::default()).unwrap(),
        Outcome::Copied
    );
    assert_eq!(
        move_file("a/h.txt", "a/b/g.txt", WriteOptions::default()).unwrap(),
        Outcome::Moved
    );

    let report = copy_dir("c", "a", WriteOptions::default()).unwrap();
    assert_eq!(report.files_copied, 2);

    let moved = move_dir("d", "c", WriteOptions::default()).unwrap();
    assert!(moved.is_complete());
    tree.assert_not_exists("c");
    tree.assert_file_contains("d/b/f.txt", "global");

    assert_eq!(delete_file("a/h.txt").unwrap(), Outcome::Removed);
    assert_eq!(delete_dir("a").unwrap(), Outcome::Removed);
    assert_eq!(delete_dir("a").unwrap(), Outcome::NotFound);
}
