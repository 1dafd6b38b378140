//! Project-root anchored path resolution
//!
//! Relative paths handed to fskit are interpreted against a fixed project
//! root. The root is an explicit [`ProjectRoot`] value; a process-wide
//! instance is available through [`init_root`] and [`project_root`].

use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::{Error, Result};

/// Environment variable consulted by [`ProjectRoot::discover`].
pub const ROOT_ENV_VAR: &str = "FSKIT_ROOT";

static GLOBAL_ROOT: OnceLock<ProjectRoot> = OnceLock::new();

/// The base directory that relative paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRoot {
    dir: PathBuf,
}

impl ProjectRoot {
    /// Create a root from any directory path.
    ///
    /// A relative `dir` is anchored at the current working directory so the
    /// stored root is always absolute.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            current_dir().join(dir)
        };
        Self { dir }
    }

    /// Discover the root from the environment.
    ///
    /// Uses `FSKIT_ROOT` when it is set and non-empty, the current working
    /// directory otherwise. Existing directories are canonicalized.
    pub fn discover() -> Self {
        let dir = env::var_os(ROOT_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(current_dir);
        let root = Self::new(dir);
        match dunce::canonicalize(&root.dir) {
            Ok(dir) => Self { dir },
            Err(_) => root,
        }
    }

    /// The absolute root directory.
    pub fn as_path(&self) -> &Path {
        &self.dir
    }

    /// Resolve `path` against this root.
    ///
    /// Absolute paths come back unchanged; relative ones are joined onto the
    /// root. Existence is not checked.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}

impl Default for ProjectRoot {
    fn default() -> Self {
        Self::discover()
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.dir
    }
}

impl std::fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir.display())
    }
}

impl From<PathBuf> for ProjectRoot {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for ProjectRoot {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve symlinks and `.`/`..` where the path exists, keeping any
/// not-yet-created tail as-is.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    if let Ok(resolved) = dunce::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => normalize(parent).join(name),
        _ => path.to_path_buf(),
    }
}

/// Whether `a` and `b` name the same filesystem entry, however they are spelled.
pub(crate) fn same_path(a: &Path, b: &Path) -> bool {
    a == b || normalize(a) == normalize(b)
}

/// Set the process-wide project root.
///
/// Only the first call wins; later calls return [`Error::RootAlreadySet`].
pub fn init_root(dir: impl AsRef<Path>) -> Result<&'static ProjectRoot> {
    let root = ProjectRoot::new(dir);
    GLOBAL_ROOT.set(root).map_err(|_| Error::RootAlreadySet {
        current: project_root().as_path().to_path_buf(),
    })?;
    tracing::debug!(root = %project_root(), "Project root initialized");
    Ok(project_root())
}

/// The process-wide project root, discovered on first use if never set.
pub fn project_root() -> &'static ProjectRoot {
    GLOBAL_ROOT.get_or_init(ProjectRoot::discover)
}

/// Resolve `path` against the process-wide project root.
pub fn resolve_path(path: impl AsRef<Path>) -> PathBuf {
    project_root().resolve(path)
}
