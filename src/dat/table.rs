//! Decoded table and field reader interfaces
//!
//! The binary container parser lives outside this crate. These traits are
//! the capability boundary the renderer consumes.

use serde::{Deserialize, Serialize};

use super::column::ColumnDescriptor;
use super::value::Value;
use crate::error::{Error, Result};

/// Byte widths of the fixed-size field shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSize {
    /// 8-bit
    pub byte: usize,
    /// 16-bit
    pub short: usize,
    /// 32-bit
    pub long: usize,
    /// 64-bit
    pub longlong: usize,
    /// Pointer into the variable region
    pub string: usize,
    /// Self key
    pub key: usize,
    /// Foreign key (row index + table hash)
    pub key_foreign: usize,
}

impl FieldSize {
    /// Widths for a table with the given pointer size
    #[must_use]
    pub fn for_memsize(memsize: usize) -> Self {
        Self {
            byte: 1,
            short: 2,
            long: 4,
            longlong: 8,
            string: memsize,
            key: memsize,
            key_foreign: memsize * 2,
        }
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::for_memsize(8)
    }
}

/// Reads one column's decoded value for a given row.
pub trait FieldReader {
    /// Decode the value at `row`
    fn read(&self, row: usize) -> Result<Value>;
}

impl<F> FieldReader for F
where
    F: Fn(usize) -> Result<Value>,
{
    fn read(&self, row: usize) -> Result<Value> {
        self(row)
    }
}

/// A loaded DAT table.
///
/// Immutable for the viewer's session and owned by the opened-file record;
/// the renderer only borrows it.
pub trait DatTable {
    /// Number of rows
    fn row_count(&self) -> usize;

    /// Byte width of one fixed row
    fn row_length(&self) -> usize;

    /// Pointer width in bytes
    fn memsize(&self) -> usize;

    /// Fixed field widths
    fn field_size(&self) -> &FieldSize;

    /// Fixed region, `row_count * row_length` bytes
    fn data_fixed(&self) -> &[u8];

    /// Variable region
    fn data_variable(&self) -> &[u8];

    /// Value reader for a column of this table
    fn field_reader(&self, column: &ColumnDescriptor) -> Result<Box<dyn FieldReader + '_>>;

    /// Little-endian `u32` at byte `pos` of the fixed region
    fn read_u32_le(&self, pos: usize) -> Result<u32> {
        let fixed = self.data_fixed();
        let bytes = pos
            .checked_add(4)
            .and_then(|end| fixed.get(pos..end))
            .ok_or(Error::OutOfBounds {
                offset: pos,
                len: fixed.len(),
            })?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::MemoryTable;

    #[test]
    fn f_field_size_for_memsize() {
        let sizes = FieldSize::for_memsize(4);
        assert_eq!(sizes.byte, 1);
        assert_eq!(sizes.long, 4);
        assert_eq!(sizes.key, 4);
        assert_eq!(sizes.key_foreign, 8);
        assert_eq!(FieldSize::default().key_foreign, 16);
    }

    #[test]
    fn f_read_u32_le() {
        let table = MemoryTable::new(8, 4).with_fixed(vec![1, 0, 0, 0, 0x10, 0x27, 0, 0]);
        assert_eq!(table.read_u32_le(0).unwrap(), 1);
        assert_eq!(table.read_u32_le(4).unwrap(), 10_000);
    }

    #[test]
    fn f_read_u32_le_out_of_bounds() {
        let table = MemoryTable::new(4, 4).with_fixed(vec![1, 2, 3, 4]);
        let err = table.read_u32_le(2).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 2, len: 4 }));
        assert!(table.read_u32_le(usize::MAX).is_err());
    }

    #[test]
    fn f_closure_is_field_reader() {
        let reader = |row: usize| -> Result<Value> { Ok(Value::Integer(row as i64 * 2)) };
        assert_eq!(reader.read(21).unwrap(), Value::Integer(42));
    }
}
