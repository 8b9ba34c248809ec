//! Identifier collections for Scave
//!
//! This crate provides `IdList`, an ordered collection of result item
//! identifiers, with:
//! - Duplicate-free insertion, positional erase, subset extraction
//! - Set algebra (merge, subtract, intersect) by identifier value
//! - Integrity and kind checks against a `ResultRepository`
//! - Sorting by repository metadata (`SortKey`)
//! - Raw binary marshalling (8 native-order bytes per identifier)
//! - Sort configuration (`SortConfig`, `scave.toml`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod config;
pub mod integrity;
pub mod list;
pub mod sort;

pub use codec::ID_SIZE;
pub use config::{SortConfig, CONFIG_FILE_NAME};
pub use list::IdList;
pub use sort::SortKey;
