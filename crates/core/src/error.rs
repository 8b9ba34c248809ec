//! Error types for Scave
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::types::{Id, ItemKind, ItemTypes};
use std::io;
use thiserror::Error;

/// Result type alias for Scave operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for identifier collections and the result repository
#[derive(Debug, Error)]
pub enum Error {
    /// Position argument outside `[0, len)`
    #[error("Index {index} out of range for length {len}")]
    OutOfRange {
        /// Requested position
        index: usize,
        /// Length of the collection at the time of the call
        len: usize,
    },

    /// Byte buffer does not match the 8-bytes-per-identifier contract
    #[error("Invalid byte array size {len}: {reason}")]
    InvalidSize {
        /// Length of the supplied buffer
        len: usize,
        /// Which contract was violated
        reason: &'static str,
    },

    /// Identifier does not denote a live entry in the repository
    #[error("Invalid ID {id}: {reason}")]
    IntegrityViolation {
        /// Offending identifier
        id: Id,
        /// Why resolution failed
        reason: String,
    },

    /// Kind-restricted operation found mixed or wrong-kind identifiers
    #[error("These items are not all {}: found kinds {found:?}", expected.plural())]
    HeterogeneityViolation {
        /// Kind the operation requires
        expected: ItemKind,
        /// Union of kinds actually present
        found: ItemTypes,
    },

    /// Repository handle (file, run, file-run) not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build an `IntegrityViolation` for `id`
    pub fn integrity(id: Id, reason: impl Into<String>) -> Self {
        Error::IntegrityViolation {
            id,
            reason: reason.into(),
        }
    }

    /// True for errors raised by position checks
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. })
    }
}
