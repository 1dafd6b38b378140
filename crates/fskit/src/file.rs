//! Single-file write, copy, delete and move
//!
//! All functions take paths that are already resolved against the project
//! root. Replacing writes go through a locked temp file in the destination
//! directory followed by a rename, so readers never observe a partial file.
//! Non-overwriting writes open the destination with create-new semantics,
//! which makes the "already exists" check and the create a single step.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::root::same_path;
use crate::{Error, Outcome, Result, WriteOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `data` to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, data: &[u8], opts: WriteOptions) -> Result<Outcome> {
    tracing::debug!(
        path = %path.display(),
        overwrite = opts.overwrite,
        len = data.len(),
        "write_file"
    );
    reject_dir(path)?;
    ensure_parent(path)?;

    if !opts.overwrite {
        let Some(mut file) = create_new(path)? else {
            tracing::debug!(path = %path.display(), "Destination exists, skipping write");
            return Ok(Outcome::Skipped);
        };
        fill_new(path, &mut file, |f| f.write_all(data))?;
        return Ok(Outcome::Written);
    }

    replace_with(path, |f| f.write_all(data))?;
    Ok(Outcome::Written)
}

/// Stream the bytes of `source` into `target`.
pub(crate) fn copy_file(target: &Path, source: &Path, opts: WriteOptions) -> Result<Outcome> {
    tracing::debug!(
        target = %target.display(),
        source = %source.display(),
        overwrite = opts.overwrite,
        "copy_file"
    );
    let meta = fs::metadata(source).map_err(|e| Error::io(source, e))?;
    if meta.is_dir() {
        return Err(Error::NotAFile {
            path: source.to_path_buf(),
        });
    }
    reject_dir(target)?;
    let src = File::open(source).map_err(|e| Error::io(source, e))?;
    ensure_parent(target)?;

    if !opts.overwrite {
        let Some(mut file) = create_new(target)? else {
            tracing::debug!(target = %target.display(), "Destination exists, skipping copy");
            return Ok(Outcome::Skipped);
        };
        fill_new(target, &mut file, |f| stream(&src, f))?;
        return Ok(Outcome::Copied);
    }

    replace_with(target, |f| stream(&src, f))?;
    Ok(Outcome::Copied)
}

/// Remove `path`. A missing file is not an error.
pub(crate) fn delete_file(path: &Path) -> Result<Outcome> {
    tracing::debug!(path = %path.display(), "delete_file");
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(Error::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Outcome::NotFound),
        Err(e) => return Err(Error::io(path, e)),
    }

    match fs::remove_file(path) {
        Ok(()) => Ok(Outcome::Removed),
        // Vanished between the check and the unlink.
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Outcome::NotFound),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Copy `source` to `target`, then remove `source`.
///
/// When the copy is skipped because `target` exists and overwrite is off,
/// `source` is kept and [`Outcome::Skipped`] is returned. Two spellings of
/// the same file, e.g. through `..` or a symlink, are left untouched.
pub(crate) fn move_file(target: &Path, source: &Path, opts: WriteOptions) -> Result<Outcome> {
    if same_path(target, source) {
        return Ok(Outcome::Unchanged);
    }
    match copy_file(target, source, opts)? {
        Outcome::Skipped => {
            tracing::debug!(
                source = %source.display(),
                "Move target exists, source left in place"
            );
            Ok(Outcome::Skipped)
        }
        _ => {
            delete_file(source)?;
            Ok(Outcome::Moved)
        }
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

fn reject_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn stream(src: &File, dst: &mut File) -> io::Result<()> {
    let mut reader = BufReader::new(src);
    let mut writer = BufWriter::new(dst);
    io::copy(&mut reader, &mut writer)?;
    writer.flush()
}

/// Open `path` only if it does not exist yet. `None` means it already exists.
fn create_new(path: &Path) -> Result<Option<File>> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if path.is_dir() {
                return Err(Error::NotAFile {
                    path: path.to_path_buf(),
                });
            }
            Ok(None)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Run `fill` against a freshly created file, removing it again on failure.
fn fill_new<F>(path: &Path, file: &mut File, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let res = fill(&mut *file).and_then(|_| file.sync_all());
    if let Err(e) = res {
        let _ = fs::remove_file(path);
        return Err(Error::io(path, e));
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    );
    path.with_file_name(temp_name)
}

/// Replace `path` atomically with content produced by `fill`.
fn replace_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let temp_path = temp_path_for(path);
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    let res = write_locked(path, &temp_path, &mut temp_file, fill);
    drop(temp_file);
    let res = res.and_then(|_| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));
    if res.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    res
}

fn write_locked<F>(path: &Path, temp_path: &Path, temp_file: &mut File, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    fill(&mut *temp_file).map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    FileExt::unlock(&*temp_file).map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    Ok(())
}
