//! Core types and traits for Scave
//!
//! This crate defines the foundational types used throughout the system:
//! - Id: Opaque 64-bit handle to a result item (kind tag + file slot + position)
//! - ItemKind / ItemTypes: Item kind discriminator and kind bitmask
//! - Metadata: Files, runs, file-runs and per-kind summaries
//! - ResultRepository: Facade through which identifiers are resolved
//! - dict_cmp: Dictionary-order string comparison
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod metadata;
pub mod strings;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use metadata::{
    split_file_path, FileRun, HistogramResult, ItemData, ItemMetadata, ResultFile, Run,
    Statistics, VectorResult,
};
pub use strings::{dict_cmp, dict_less};
pub use traits::ResultRepository;
pub use types::{FileId, FileRunId, Id, ItemKind, ItemTypes, RunId};
