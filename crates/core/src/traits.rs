//! Core traits for repository access
//!
//! This module defines the ResultRepository trait through which identifier
//! collections resolve identifiers, so that collections never depend on a
//! particular repository implementation.

use crate::error::Result;
use crate::metadata::ItemMetadata;
use crate::types::{Id, ItemKind};

/// Read access to a result repository
///
/// Implementations resolve identifiers to the metadata needed for
/// validation and ordering. Resolution reads live state: if the repository
/// is mutated between calls, results may change.
///
/// Concurrency is the caller's concern: wrap a repository in a
/// `parking_lot::RwLock` and hold the read guard while a sort runs.
pub trait ResultRepository {
    /// Resolve an identifier to its metadata
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if `id` does not currently denote a
    /// live entry (unknown kind tag, unloaded file, position out of range).
    fn resolve(&self, id: Id) -> Result<ItemMetadata<'_>>;

    /// Extract the item kind of an identifier
    ///
    /// The kind is embedded in the identifier, so this does not consult
    /// repository state.
    fn kind_of(&self, id: Id) -> Option<ItemKind> {
        id.kind()
    }

    /// Check whether `id` denotes a live entry
    fn contains(&self, id: Id) -> bool {
        self.resolve(id).is_ok()
    }
}

impl<R: ResultRepository + ?Sized> ResultRepository for &R {
    fn resolve(&self, id: Id) -> Result<ItemMetadata<'_>> {
        (**self).resolve(id)
    }
}
