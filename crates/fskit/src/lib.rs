//! Project-rooted filesystem helpers
//!
//! Recursive directory create/copy/move/delete, overwrite-aware single-file
//! write/copy/move/delete, and a byte-size formatter. Relative paths are
//! resolved against a fixed project root.
//!
//! Operations are not synchronized with each other: running two of them
//! against overlapping paths at the same time has no defined result.

pub mod bytes;
pub mod config;
mod dir;
pub mod error;
mod file;
pub mod logging;
pub mod ops;
pub mod options;
pub mod root;

pub use bytes::{FormatOptions, SpaceUnit, format_bytes, format_bytes_default};
pub use config::Settings;
pub use error::{Error, Result};
pub use ops::{
    ProjectFs, copy_dir, copy_file, delete_dir, delete_file, make_dir, move_dir, move_file,
    write_file,
};
pub use options::{CopyReport, Outcome, WriteOptions};
pub use root::{ProjectRoot, init_root, project_root, resolve_path};
