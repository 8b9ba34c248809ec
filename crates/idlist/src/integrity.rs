//! Integrity and kind checks against a result repository
//!
//! Validity of an identifier is only meaningful relative to a repository
//! snapshot. Checks here are precondition passes: they never mutate the list.

use scave_core::{Error, ItemKind, ItemMetadata, ItemTypes, Result, ResultRepository};

use crate::list::IdList;

impl IdList {
    /// Union of the kind tags of all identifiers
    ///
    /// Does not consult the repository; unknown tags are kept in the mask.
    pub fn get_item_types(&self) -> ItemTypes {
        self.ids
            .iter()
            .fold(ItemTypes::empty(), |acc, id| {
                acc | ItemTypes::from_bits_retain(id.type_bits())
            })
    }

    /// True if every identifier is a scalar (vacuously true when empty)
    pub fn are_all_scalars(&self) -> bool {
        self.get_item_types().is_only(ItemKind::Scalar)
    }

    /// True if every identifier is a vector (vacuously true when empty)
    pub fn are_all_vectors(&self) -> bool {
        self.get_item_types().is_only(ItemKind::Vector)
    }

    /// True if every identifier is a histogram (vacuously true when empty)
    pub fn are_all_histograms(&self) -> bool {
        self.get_item_types().is_only(ItemKind::Histogram)
    }

    /// Verify that every identifier resolves against `repo`
    ///
    /// # Errors
    ///
    /// Returns the first `IntegrityViolation` reported by the repository.
    pub fn check_integrity<R: ResultRepository + ?Sized>(&self, repo: &R) -> Result<()> {
        for &id in &self.ids {
            repo.resolve(id)?;
        }
        Ok(())
    }

    /// Verify integrity, then that every identifier is a scalar
    pub fn check_integrity_all_scalars<R: ResultRepository + ?Sized>(&self, repo: &R) -> Result<()> {
        self.check_integrity_all(repo, ItemKind::Scalar)
    }

    /// Verify integrity, then that every identifier is a vector
    pub fn check_integrity_all_vectors<R: ResultRepository + ?Sized>(&self, repo: &R) -> Result<()> {
        self.check_integrity_all(repo, ItemKind::Vector)
    }

    /// Verify integrity, then that every identifier is a histogram
    pub fn check_integrity_all_histograms<R: ResultRepository + ?Sized>(
        &self,
        repo: &R,
    ) -> Result<()> {
        self.check_integrity_all(repo, ItemKind::Histogram)
    }

    /// Verify integrity, then that every identifier is of `kind`
    ///
    /// # Errors
    ///
    /// Returns `IntegrityViolation` if an identifier does not resolve, or
    /// `HeterogeneityViolation` if the kind mask is not exactly `kind`.
    pub fn check_integrity_all<R: ResultRepository + ?Sized>(
        &self,
        repo: &R,
        kind: ItemKind,
    ) -> Result<()> {
        self.check_integrity(repo)?;
        self.check_kind(kind)
    }

    pub(crate) fn check_kind(&self, kind: ItemKind) -> Result<()> {
        let found = self.get_item_types();
        if found.is_only(kind) {
            Ok(())
        } else {
            Err(Error::HeterogeneityViolation {
                expected: kind,
                found,
            })
        }
    }

    /// Resolve every identifier, in order
    ///
    /// This is the integrity check of the sort driver: it fails exactly when
    /// `check_integrity` would.
    pub(crate) fn resolve_all<'r, R: ResultRepository + ?Sized>(
        &self,
        repo: &'r R,
    ) -> Result<Vec<ItemMetadata<'r>>> {
        self.ids.iter().map(|&id| repo.resolve(id)).collect()
    }
}
