//! [`TestTree`] builder for temporary directory fixtures.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for building file trees and asserting
/// on their contents.
///
/// # Example
///
/// ```rust,no_run
/// use fskit_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.file("src/a/b.txt", "hello");
/// tree.assert_file_contains("src/a/b.txt", "hello");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

/// One entry of a snapshotted tree: `None` for a directory, file bytes otherwise.
pub type TreeEntry = Option<Vec<u8>>;

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` under the root. Nothing is created.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Create directory `rel` (and its parents).
    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write `content` to `rel`, creating parents.
    pub fn file(&self, rel: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read `rel` as UTF-8.
    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Map of every entry under `rel`, keyed by forward-slash relative path.
    pub fn snapshot(&self, rel: &str) -> BTreeMap<String, TreeEntry> {
        let base = self.path(rel);
        let mut entries = BTreeMap::new();
        collect(&base, &base, &mut entries);
        entries
    }

    /// Assert that `left` and `right` hold the same directories and
    /// byte-identical files.
    ///
    /// # Panics
    /// Panics with a diff of the two trees if they differ.
    pub fn assert_same_tree(&self, left: &str, right: &str) {
        pretty_assertions::assert_eq!(self.snapshot(left), self.snapshot(right));
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(path).display(),
            content,
            file_content
        );
    }
}

fn collect(base: &Path, dir: &Path, entries: &mut BTreeMap<String, TreeEntry>) {
    let iter = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("Could not read directory {}: {e}", dir.display()));
    for entry in iter {
        let path = entry.unwrap().path();
        let key = path
            .strip_prefix(base)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/");
        if path.is_dir() {
            entries.insert(key, None);
            collect(base, &path, entries);
        } else {
            entries.insert(key, Some(fs::read(&path).unwrap()));
        }
    }
}
