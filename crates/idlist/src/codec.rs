//! Binary marshalling of identifier lists
//!
//! Format: the raw 64-bit value of each identifier, in list order, in
//! native byte order. No header, no length prefix, no version byte.
//!
//! ```text
//! +----------+----------+-----+----------+
//! |  id[0]   |  id[1]   | ... | id[n-1]  |   8 bytes each
//! +----------+----------+-----+----------+
//! ```
//!
//! Both ends of a transfer must share byte order.

use byteorder::{ByteOrder, NativeEndian};

use scave_core::{Error, Id, Result};

use crate::list::IdList;

/// Encoded size of one identifier
pub const ID_SIZE: usize = 8;

impl IdList {
    /// Write every identifier into `buf`
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` unless `buf.len() == 8 * len()`.
    pub fn to_byte_array(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() != self.ids.len() * ID_SIZE {
            return Err(Error::InvalidSize {
                len: buf.len(),
                reason: "must be 8 * number of IDs",
            });
        }
        for (chunk, id) in buf.chunks_exact_mut(ID_SIZE).zip(&self.ids) {
            NativeEndian::write_u64(chunk, id.raw());
        }
        Ok(())
    }

    /// Encode into a freshly allocated buffer of exactly `8 * len()` bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.ids.len() * ID_SIZE];
        for (chunk, id) in buf.chunks_exact_mut(ID_SIZE).zip(&self.ids) {
            NativeEndian::write_u64(chunk, id.raw());
        }
        buf
    }

    /// Replace the contents with the identifiers encoded in `buf`
    ///
    /// Identifiers are taken as given: no deduplication and no validation.
    /// Call `check_integrity` afterwards if needed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSize` if `buf.len()` is not a multiple of 8; the list
    /// is unchanged in that case.
    pub fn from_byte_array(&mut self, buf: &[u8]) -> Result<()> {
        if buf.len() % ID_SIZE != 0 {
            return Err(Error::InvalidSize {
                len: buf.len(),
                reason: "must be a multiple of 8",
            });
        }
        self.ids = buf
            .chunks_exact(ID_SIZE)
            .map(|chunk| Id::from_raw(NativeEndian::read_u64(chunk)))
            .collect();
        Ok(())
    }

    /// Decode a new list from `buf`
    pub fn from_bytes(buf: &[u8]) -> Result<IdList> {
        let mut list = IdList::new();
        list.from_byte_array(buf)?;
        Ok(list)
    }
}
