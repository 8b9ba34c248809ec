//! Storage layer for Scave
//!
//! This crate implements an in-memory result repository with:
//! - ResultFileManager: files, runs, file-runs and result items
//! - Positional identifiers resolved in O(1)
//! - Secondary indices (run names, per-file file-runs)
//! - File unloading that invalidates identifiers into the file

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod index;
pub mod manager;

pub use index::{FileRunIndex, RunNameIndex};
pub use manager::{ResultFileManager, SharedResultFileManager};
