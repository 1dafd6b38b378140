//! Recursive directory create, copy, delete and move
//!
//! Paths are already resolved against the project root. Directory copies fan
//! out over sibling entries on a bounded rayon pool; the first failing entry
//! aborts the copy and its error is returned.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::fs::{self, DirEntry};
use std::io;
use std::path::Path;

use crate::root::{normalize, same_path};
use crate::{CopyReport, Error, Outcome, Result, WriteOptions, file};

/// Create `path` and every missing ancestor.
pub(crate) fn make_dir(path: &Path) -> Result<Outcome> {
    tracing::debug!(path = %path.display(), "make_dir");
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(Outcome::Unchanged),
        Ok(_) => Err(Error::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| Error::io(path, e))?;
            Ok(Outcome::Created)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Copy `source` into `target`.
///
/// A regular-file `source` is copied as a single file. Otherwise the tree is
/// mirrored under `target`, with each file honoring `opts.overwrite`.
///
/// Returns [`Error::Overlap`] when either directory contains the other. This
/// covers copying into a subdirectory of `source` as well as copying a
/// subdirectory up into one of its ancestors.
pub(crate) fn copy_dir(
    target: &Path,
    source: &Path,
    opts: WriteOptions,
    max_workers: Option<usize>,
) -> Result<CopyReport> {
    tracing::debug!(
        target = %target.display(),
        source = %source.display(),
        overwrite = opts.overwrite,
        "copy_dir"
    );
    let meta = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    if !meta.is_dir() {
        return file::copy_file(target, source, opts).map(CopyReport::from_file);
    }
    if is_overlap(source, target) {
        return Err(Error::Overlap {
            source_dir: source.to_path_buf(),
            target_dir: target.to_path_buf(),
        });
    }

    let workers = worker_limit(max_workers);
    if workers <= 1 {
        return copy_tree(target, source, opts, false);
    }
    match ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool.install(|| copy_tree(target, source, opts, true)),
        Err(e) => {
            tracing::warn!(workers, error = %e, "Failed to build copy pool, copying serially");
            copy_tree(target, source, opts, false)
        }
    }
}

/// Remove `path` and everything below it. A missing path is not an error.
pub(crate) fn delete_dir(path: &Path) -> Result<Outcome> {
    tracing::debug!(path = %path.display(), "delete_dir");
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(Error::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Outcome::NotFound),
        Err(e) => return Err(Error::io(path, e)),
    }

    match fs::remove_dir_all(path) {
        Ok(()) => Ok(Outcome::Removed),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Outcome::NotFound),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Copy `source` to `target`, then delete `source`.
///
/// `source` survives when any file was skipped, so an overwrite-off move
/// never drops data that did not make it to `target`.
pub(crate) fn move_dir(
    target: &Path,
    source: &Path,
    opts: WriteOptions,
    max_workers: Option<usize>,
) -> Result<CopyReport> {
    if same_path(target, source) {
        return Ok(CopyReport::default());
    }
    let meta = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    if !meta.is_dir() {
        return file::move_file(target, source, opts).map(CopyReport::from_file);
    }

    let report = copy_dir(target, source, opts, max_workers)?;
    if report.is_complete() {
        delete_dir(source)?;
    } else {
        tracing::warn!(
            source = %source.display(),
            skipped = report.files_skipped,
            "Move left source in place because some files were skipped"
        );
    }
    Ok(report)
}

fn copy_tree(
    target: &Path,
    source: &Path,
    opts: WriteOptions,
    parallel: bool,
) -> Result<CopyReport> {
    let mut report = CopyReport::default();
    if make_dir(target)? == Outcome::Created {
        report.dirs_created += 1;
    }

    let entries = fs::read_dir(source)
        .and_then(|iter| iter.collect::<io::Result<Vec<DirEntry>>>())
        .map_err(|e| Error::io(source, e))?;

    let copy_entry = |entry: &DirEntry| -> Result<CopyReport> {
        let path_src = entry.path();
        let path_dst = target.join(entry.file_name());
        if path_src.is_dir() {
            copy_tree(&path_dst, &path_src, opts, parallel)
        } else {
            file::copy_file(&path_dst, &path_src, opts).map(CopyReport::from_file)
        }
    };

    let children = if parallel {
        entries
            .par_iter()
            .map(copy_entry)
            .try_reduce(CopyReport::default, |a, b| Ok(a + b))?
    } else {
        entries
            .iter()
            .map(copy_entry)
            .try_fold(CopyReport::default(), |acc, r| r.map(|r| acc + r))?
    };
    Ok(report + children)
}

fn is_overlap(source: &Path, target: &Path) -> bool {
    let source = normalize(source);
    let target = normalize(target);
    target.starts_with(&source) || source.starts_with(&target)
}

pub(crate) fn worker_limit(max_workers: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match max_workers {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, 8),
    }
}
