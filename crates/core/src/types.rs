//! Core identifier types
//!
//! This module defines:
//! - Id: Opaque 64-bit handle to an item in a result repository
//! - ItemKind: Scalar / Vector / Histogram discriminator
//! - ItemTypes: Bitmask union of item kinds
//! - FileId, RunId, FileRunId: Handles to repository records

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of result item an identifier refers to
///
/// ## Tag Values
///
/// These values are embedded in every `Id` and MUST NOT change:
/// - Scalar = 0x1
/// - Vector = 0x2
/// - Histogram = 0x4
///
/// Tags are single bits so that a collection's kinds can be OR-ed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[repr(u16)]
pub enum ItemKind {
    /// Scalar result (single numeric value)
    Scalar = 0x1,
    /// Output vector (time series with summary statistics)
    Vector = 0x2,
    /// Histogram (distribution with summary statistics)
    Histogram = 0x4,
}

impl ItemKind {
    /// Convert to the tag stored in an `Id`
    pub fn as_bits(&self) -> u16 {
        *self as u16
    }

    /// Try to create from a tag
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            0x1 => Some(ItemKind::Scalar),
            0x2 => Some(ItemKind::Vector),
            0x4 => Some(ItemKind::Histogram),
            _ => None,
        }
    }

    /// Human-readable plural name, used in error messages
    pub fn plural(&self) -> &'static str {
        match self {
            ItemKind::Scalar => "scalars",
            ItemKind::Vector => "vectors",
            ItemKind::Histogram => "histograms",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Scalar => write!(f, "scalar"),
            ItemKind::Vector => write!(f, "vector"),
            ItemKind::Histogram => write!(f, "histogram"),
        }
    }
}

bitflags! {
    /// Union of item kinds present in a collection of identifiers
    ///
    /// Unknown tag bits are retained so that a corrupt identifier makes the
    /// mask heterogeneous instead of silently disappearing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemTypes: u16 {
        /// At least one scalar
        const SCALAR = 0x1;
        /// At least one vector
        const VECTOR = 0x2;
        /// At least one histogram
        const HISTOGRAM = 0x4;
    }
}

impl ItemTypes {
    /// True if the mask is empty or consists of exactly `kind`
    pub fn is_only(&self, kind: ItemKind) -> bool {
        self.is_empty() || self.bits() == kind.as_bits()
    }
}

impl From<ItemKind> for ItemTypes {
    fn from(kind: ItemKind) -> Self {
        ItemTypes::from_bits_retain(kind.as_bits())
    }
}

/// Opaque identifier of a result item
///
/// Layout of the 64-bit value:
///
/// ```text
/// 63          48 47          32 31                           0
/// +-------------+--------------+------------------------------+
/// |  kind tag   |  file slot   |   position within the file   |
/// +-------------+--------------+------------------------------+
/// ```
///
/// Two identifiers are equal iff their raw values are equal. The `Ord`
/// implementation is by raw value only and carries no domain meaning; it is
/// what the set-algebra operations sort by.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    /// Compose an identifier from its parts
    pub fn new(kind: ItemKind, file_slot: u16, position: u32) -> Self {
        Self(((kind.as_bits() as u64) << 48) | ((file_slot as u64) << 32) | position as u64)
    }

    /// Wrap a raw 64-bit value without validation
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw 64-bit value
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Raw kind tag bits (may be an unknown tag for corrupt identifiers)
    pub fn type_bits(&self) -> u16 {
        (self.0 >> 48) as u16
    }

    /// Item kind encoded in this identifier, if the tag is valid
    pub fn kind(&self) -> Option<ItemKind> {
        ItemKind::from_bits(self.type_bits())
    }

    /// Slot of the owning file in the repository
    pub fn file_slot(&self) -> u16 {
        (self.0 >> 32) as u16
    }

    /// Position of the item within its file's table for this kind
    pub fn position(&self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:#018x})", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl From<u64> for Id {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<Id> for u64 {
    fn from(id: Id) -> Self {
        id.0
    }
}

/// Handle to a loaded result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub u16);

/// Handle to a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(pub u32);

/// Handle to a file-run association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileRunId(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_layout() {
        let id = Id::new(ItemKind::Vector, 7, 42);
        assert_eq!(id.raw(), (2u64 << 48) | (7u64 << 32) | 42);
        assert_eq!(id.kind(), Some(ItemKind::Vector));
        assert_eq!(id.file_slot(), 7);
        assert_eq!(id.position(), 42);
    }

    #[test]
    fn test_id_max_fields() {
        let id = Id::new(ItemKind::Histogram, u16::MAX, u32::MAX);
        assert_eq!(id.kind(), Some(ItemKind::Histogram));
        assert_eq!(id.file_slot(), u16::MAX);
        assert_eq!(id.position(), u32::MAX);
    }

    #[test]
    fn test_id_unknown_kind() {
        let id = Id::from_raw(0x0003_0000_0000_0001);
        assert_eq!(id.type_bits(), 3);
        assert_eq!(id.kind(), None);
    }

    #[test]
    fn test_id_equality_is_by_value() {
        assert_eq!(Id::from_raw(5), Id::from(5u64));
        assert_ne!(Id::from_raw(5), Id::from_raw(6));
        assert_eq!(u64::from(Id::from_raw(9)), 9);
    }

    #[test]
    fn test_item_kind_roundtrip() {
        for kind in [ItemKind::Scalar, ItemKind::Vector, ItemKind::Histogram] {
            assert_eq!(ItemKind::from_bits(kind.as_bits()), Some(kind));
        }
        assert_eq!(ItemKind::from_bits(0), None);
        assert_eq!(ItemKind::from_bits(3), None);
    }

    #[test]
    fn test_item_types_is_only() {
        assert!(ItemTypes::empty().is_only(ItemKind::Scalar));
        assert!(ItemTypes::empty().is_only(ItemKind::Histogram));
        assert!(ItemTypes::SCALAR.is_only(ItemKind::Scalar));
        assert!(!ItemTypes::SCALAR.is_only(ItemKind::Vector));
        assert!(!(ItemTypes::SCALAR | ItemTypes::VECTOR).is_only(ItemKind::Scalar));
        assert!(!ItemTypes::from_bits_retain(0x8).is_only(ItemKind::Scalar));
    }

    #[test]
    fn test_display() {
        assert_eq!(ItemKind::Scalar.to_string(), "scalar");
        assert_eq!(Id::from_raw(1).to_string(), "0x0000000000000001");
    }
}
