//! Public operations, rooted at a project directory
//!
//! [`ProjectFs`] resolves every incoming path exactly once against its
//! [`ProjectRoot`] and hands absolute paths to the directory and file
//! routines. The free functions at the bottom do the same against the
//! process-wide root.

use std::path::{Path, PathBuf};

use crate::root::{ProjectRoot, project_root};
use crate::{CopyReport, Outcome, Result, Settings, WriteOptions, dir, file};

/// Filesystem operations anchored at one project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFs {
    root: ProjectRoot,
    max_concurrency: Option<usize>,
    defaults: WriteOptions,
}

impl ProjectFs {
    /// Operations rooted at `root` with default settings.
    pub fn new(root: ProjectRoot) -> Self {
        Self {
            root,
            max_concurrency: None,
            defaults: WriteOptions::default(),
        }
    }

    /// Operations rooted at directory `dir`.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self::new(ProjectRoot::new(dir))
    }

    /// Operations rooted at the process-wide project root.
    pub fn global() -> Self {
        Self::new(project_root().clone())
    }

    /// Build from loaded [`Settings`]. A missing root is discovered.
    pub fn from_settings(settings: &Settings) -> Self {
        let root = match &settings.root {
            Some(dir) => ProjectRoot::new(dir),
            None => ProjectRoot::discover(),
        };
        Self {
            root,
            max_concurrency: settings.max_concurrency,
            defaults: settings.write_options(),
        }
    }

    /// Cap the number of concurrent entry copies in directory operations.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    pub fn root(&self) -> &ProjectRoot {
        &self.root
    }

    /// Write options configured as this instance's default.
    pub fn write_options(&self) -> WriteOptions {
        self.defaults
    }

    /// Resolve `path` against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.resolve(path)
    }

    /// Create a directory and all missing ancestors.
    pub fn make_dir(&self, path: impl AsRef<Path>) -> Result<Outcome> {
        dir::make_dir(&self.resolve(path))
    }

    /// Recursively copy `source` into `target`.
    ///
    /// Fails with [`crate::Error::Overlap`] when either directory contains the other.
    pub fn copy_dir(
        &self,
        target: impl AsRef<Path>,
        source: impl AsRef<Path>,
        opts: WriteOptions,
    ) -> Result<CopyReport> {
        dir::copy_dir(
            &self.resolve(target),
            &self.resolve(source),
            opts,
            self.max_concurrency,
        )
    }

    /// Recursively delete a directory. Absent directories are not an error.
    pub fn delete_dir(&self, path: impl AsRef<Path>) -> Result<Outcome> {
        dir::delete_dir(&self.resolve(path))
    }

    /// Copy `source` to `target`, then delete `source`.
    pub fn move_dir(
        &self,
        target: impl AsRef<Path>,
        source: impl AsRef<Path>,
        opts: WriteOptions,
    ) -> Result<CopyReport> {
        dir::move_dir(
            &self.resolve(target),
            &self.resolve(source),
            opts,
            self.max_concurrency,
        )
    }

    /// Write `data` to `path`, creating parent directories.
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        data: impl AsRef<[u8]>,
        opts: WriteOptions,
    ) -> Result<Outcome> {
        file::write_file(&self.resolve(path), data.as_ref(), opts)
    }

    /// Stream `source` into `target`.
    pub fn copy_file(
        &self,
        target: impl AsRef<Path>,
        source: impl AsRef<Path>,
        opts: WriteOptions,
    ) -> Result<Outcome> {
        file::copy_file(&self.resolve(target), &self.resolve(source), opts)
    }

    /// Delete a file. Absent files are not an error.
    pub fn delete_file(&self, path: impl AsRef<Path>) -> Result<Outcome> {
        file::delete_file(&self.resolve(path))
    }

    /// Copy `source` to `target`, then delete `source`.
    pub fn move_file(
        &self,
        target: impl AsRef<Path>,
        source: impl AsRef<Path>,
        opts: WriteOptions,
    ) -> Result<Outcome> {
        file::move_file(&self.resolve(target), &self.resolve(source), opts)
    }
}

impl Default for ProjectFs {
    fn default() -> Self {
        Self::global()
    }
}

/// [`ProjectFs::make_dir`] against the process-wide root.
pub fn make_dir(path: impl AsRef<Path>) -> Result<Outcome> {
    ProjectFs::global().make_dir(path)
}

/// [`ProjectFs::copy_dir`] against the process-wide root.
pub fn copy_dir(
    target: impl AsRef<Path>,
    source: impl AsRef<Path>,
    opts: WriteOptions,
) -> Result<CopyReport> {
    ProjectFs::global().copy_dir(target, source, opts)
}

/// [`ProjectFs::delete_dir`] against the process-wide root.
pub fn delete_dir(path: impl AsRef<Path>) -> Result<Outcome> {
    ProjectFs::global().delete_dir(path)
}

/// [`ProjectFs::move_dir`] against the process-wide root.
pub fn move_dir(
    target: impl AsRef<Path>,
    source: impl AsRef<Path>,
    opts: WriteOptions,
) -> Result<CopyReport> {
    ProjectFs::global().move_dir(target, source, opts)
}

/// [`ProjectFs::write_file`] against the process-wide root.
pub fn write_file(
    path: impl AsRef<Path>,
    data: impl AsRef<[u8]>,
    opts: WriteOptions,
) -> Result<Outcome> {
    ProjectFs::global().write_file(path, data, opts)
}

/// [`ProjectFs::copy_file`] against the process-wide root.
pub fn copy_file(
    target: impl AsRef<Path>,
    source: impl AsRef<Path>,
    opts: WriteOptions,
) -> Result<Outcome> {
    ProjectFs::global().copy_file(target, source, opts)
}

/// [`ProjectFs::delete_file`] against the process-wide root.
pub fn delete_file(path: impl AsRef<Path>) -> Result<Outcome> {
    ProjectFs::global().delete_file(path)
}

/// [`ProjectFs::move_file`] against the process-wide root.
pub fn move_file(
    target: impl AsRef<Path>,
    source: impl AsRef<Path>,
    opts: WriteOptions,
) -> Result<Outcome> {
    ProjectFs::global().move_file(target, source, opts)
}
