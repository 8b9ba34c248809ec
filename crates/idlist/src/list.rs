//! IdList: ordered collection of result item identifiers
//!
//! Insertion order is preserved until a sort or reversal. Single-item
//! insertion (`add`) never introduces duplicates; bulk paths
//! (`from_byte_array`, `subset_by_indices`, `From<Vec<Id>>`) copy
//! identifiers as given.
//!
//! # Set algebra
//!
//! `merge`, `subtract` and `intersect` sort *both* operands by raw
//! identifier value as a side effect, build the result into a fresh vector
//! and only then replace the receiver's contents. The result is strictly
//! increasing by identifier value; any custom order is lost.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use scave_core::{Error, Id, Result};

/// Ordered collection of identifiers
///
/// Owns its backing vector exclusively; `Clone` and `dup` produce
/// independent copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IdList {
    pub(crate) ids: Vec<Id>,
}

impl IdList {
    /// Create an empty list
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Create an empty list with room for `capacity` identifiers
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if the list holds no identifiers
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Identifier at position `i`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `i >= len()`.
    pub fn get(&self, i: usize) -> Result<Id> {
        self.ids.get(i).copied().ok_or(Error::OutOfRange {
            index: i,
            len: self.ids.len(),
        })
    }

    /// View the identifiers in order
    pub fn as_slice(&self) -> &[Id] {
        &self.ids
    }

    /// Iterate over the identifiers in order
    pub fn iter(&self) -> std::slice::Iter<'_, Id> {
        self.ids.iter()
    }

    /// Check membership by value (linear scan)
    pub fn contains(&self, x: Id) -> bool {
        self.ids.contains(&x)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Append `x` unless it is already present
    ///
    /// Returns `true` if the identifier was appended. O(n).
    pub fn add(&mut self, x: Id) -> bool {
        if self.ids.contains(&x) {
            return false;
        }
        self.ids.push(x);
        true
    }

    /// Remove and return the identifier at position `i`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `i >= len()`; the list is left unchanged.
    pub fn erase(&mut self, i: usize) -> Result<Id> {
        if i >= self.ids.len() {
            return Err(Error::OutOfRange {
                index: i,
                len: self.ids.len(),
            });
        }
        Ok(self.ids.remove(i))
    }

    /// Position of the first occurrence of `x`, or `None` if absent
    pub fn index_of(&self, x: Id) -> Option<usize> {
        self.ids.iter().position(|&id| id == x)
    }

    /// Remove the first occurrence of `x`
    ///
    /// Returns `true` if an identifier was removed. Order of the remaining
    /// identifiers is unchanged; no sorting is involved.
    pub fn remove_id(&mut self, x: Id) -> bool {
        match self.index_of(x) {
            Some(i) => {
                self.ids.remove(i);
                true
            }
            None => false,
        }
    }

    /// Reverse the order in place
    pub fn reverse(&mut self) {
        self.ids.reverse();
    }

    /// Remove all identifiers
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the contents with a copy of `other`
    pub fn set(&mut self, other: &IdList) {
        self.ids.clone_from(&other.ids);
    }

    /// Independent copy of this list
    pub fn dup(&self) -> IdList {
        self.clone()
    }

    /// New list holding the identifiers at `indices`, in that order
    ///
    /// Indices may repeat; the result is not deduplicated.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for the first invalid index.
    pub fn subset_by_indices(&self, indices: &[usize]) -> Result<IdList> {
        let ids = indices
            .iter()
            .map(|&i| self.get(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(IdList { ids })
    }

    // ========================================================================
    // Set algebra
    // ========================================================================

    /// Replace the contents with the union of both lists
    ///
    /// Both `self` and `other` are sorted by identifier value as a side effect.
    pub fn merge(&mut self, other: &mut IdList) {
        self.ids.sort_unstable();
        other.ids.sort_unstable();
        let merged = sorted_union(&self.ids, &other.ids);
        debug!(
            target: "scave::idlist",
            left = self.ids.len(),
            right = other.ids.len(),
            result = merged.len(),
            "merge"
        );
        self.ids = merged;
    }

    /// Replace the contents with the identifiers not present in `other`
    ///
    /// Both `self` and `other` are sorted by identifier value as a side effect.
    pub fn subtract(&mut self, other: &mut IdList) {
        self.ids.sort_unstable();
        other.ids.sort_unstable();
        let difference = sorted_difference(&self.ids, &other.ids);
        debug!(
            target: "scave::idlist",
            left = self.ids.len(),
            right = other.ids.len(),
            result = difference.len(),
            "subtract"
        );
        self.ids = difference;
    }

    /// Replace the contents with the identifiers also present in `other`
    ///
    /// Both `self` and `other` are sorted by identifier value as a side effect.
    pub fn intersect(&mut self, other: &mut IdList) {
        self.ids.sort_unstable();
        other.ids.sort_unstable();
        let intersection = sorted_intersection(&self.ids, &other.ids);
        debug!(
            target: "scave::idlist",
            left = self.ids.len(),
            right = other.ids.len(),
            result = intersection.len(),
            "intersect"
        );
        self.ids = intersection;
    }
}

/// Push `x` unless it equals the last element (input is sorted)
fn push_distinct(out: &mut Vec<Id>, x: Id) {
    if out.last() != Some(&x) {
        out.push(x);
    }
}

fn sorted_union(a: &[Id], b: &[Id]) -> Vec<Id> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => {
                push_distinct(&mut out, a[i]);
                i += 1;
            }
            Ordering::Greater => {
                push_distinct(&mut out, b[j]);
                j += 1;
            }
            Ordering::Equal => {
                push_distinct(&mut out, a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    for &x in a[i..].iter().chain(&b[j..]) {
        push_distinct(&mut out, x);
    }
    out
}

fn sorted_difference(a: &[Id], b: &[Id]) -> Vec<Id> {
    let mut out = Vec::with_capacity(a.len());
    let mut j = 0;
    for &x in a {
        while j < b.len() && b[j] < x {
            j += 1;
        }
        if j < b.len() && b[j] == x {
            continue;
        }
        push_distinct(&mut out, x);
    }
    out
}

fn sorted_intersection(a: &[Id], b: &[Id]) -> Vec<Id> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                push_distinct(&mut out, a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

impl From<Vec<Id>> for IdList {
    /// Wrap a vector as given, without deduplication
    fn from(ids: Vec<Id>) -> Self {
        Self { ids }
    }
}

impl From<IdList> for Vec<Id> {
    fn from(list: IdList) -> Self {
        list.ids
    }
}

impl FromIterator<Id> for IdList {
    /// Collect with `add` semantics: later duplicates are dropped
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let ids = iter.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { ids }
    }
}

impl IntoIterator for IdList {
    type Item = Id;
    type IntoIter = std::vec::IntoIter<Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a IdList {
    type Item = &'a Id;
    type IntoIter = std::slice::Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
