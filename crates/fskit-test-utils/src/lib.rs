//! Shared test utilities for the fskit workspace.
//!
//! This crate is a dev-dependency only. It is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for temporary directory fixtures

pub mod tree;

pub use tree::TestTree;
