//! Operation options and result types

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Options shared by every write, copy and move operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Replace an existing destination. When `false` an existing destination
    /// is left untouched and the operation reports [`Outcome::Skipped`].
    #[serde(default)]
    pub overwrite: bool,
}

impl WriteOptions {
    /// Options that replace existing destinations.
    pub fn overwrite() -> Self {
        Self { overwrite: true }
    }

    /// Options that leave existing destinations untouched.
    pub fn keep_existing() -> Self {
        Self { overwrite: false }
    }
}

/// What a single-path operation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A directory was created.
    Created,
    /// File content was written.
    Written,
    /// File content was copied from a source.
    Copied,
    /// A file was copied to its destination and the source removed.
    Moved,
    /// A file or directory was removed.
    Removed,
    /// The destination already existed and overwrite was off.
    Skipped,
    /// Nothing to delete.
    NotFound,
    /// The path was already in the requested state.
    Unchanged,
}

impl Outcome {
    /// Whether the operation changed the filesystem.
    pub fn is_change(self) -> bool {
        matches!(
            self,
            Self::Created | Self::Written | Self::Copied | Self::Moved | Self::Removed
        )
    }
}

/// Counters for one directory copy or move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Files whose bytes were copied.
    pub files_copied: u64,
    /// Files left alone because the destination existed.
    pub files_skipped: u64,
    /// Destination directories that did not exist before.
    pub dirs_created: u64,
}

impl CopyReport {
    /// Fold a single-file outcome into the counters.
    pub fn record_file(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Copied | Outcome::Written | Outcome::Moved => self.files_copied += 1,
            Outcome::Skipped => self.files_skipped += 1,
            _ => {}
        }
    }

    /// Report for a single-file outcome.
    pub fn from_file(outcome: Outcome) -> Self {
        let mut report = Self::default();
        report.record_file(outcome);
        report
    }

    /// Whether the run left nothing behind in the source.
    pub fn is_complete(&self) -> bool {
        self.files_skipped == 0
    }
}

impl Add for CopyReport {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            files_copied: self.files_copied + rhs.files_copied,
            files_skipped: self.files_skipped + rhs.files_skipped,
            dirs_created: self.dirs_created + rhs.dirs_created,
        }
    }
}

impl AddAssign for CopyReport {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for CopyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "copied={} skipped={} dirs_created={}",
            self.files_copied, self.files_skipped, self.dirs_created
        )
    }
}
