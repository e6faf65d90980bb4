//! Column statistics
//!
//! Computed by the external analyzer whenever a file or column is
//! (re-)analyzed. The renderer only uses the variant shapes observed in a
//! variable-length array column to size the raw dump stride.

use serde::{Deserialize, Serialize};

use super::table::FieldSize;

/// Entry shapes observed in an array column's variable data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefArrayStats {
    /// Entries could be foreign keys
    pub key_foreign: bool,
    /// Entries could be self keys
    pub key_self: bool,
    /// Entries could be string pointers
    pub string: bool,
    /// Entries could be 32-bit numbers
    pub numeric32: bool,
}

/// Precomputed summary of one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnStats {
    /// Array entry shapes; `None` when the column was not analyzed as an array
    pub ref_array: Option<RefArrayStats>,
}

impl ColumnStats {
    /// Stats for an analyzed array column
    #[must_use]
    pub fn with_ref_array(ref_array: RefArrayStats) -> Self {
        Self {
            ref_array: Some(ref_array),
        }
    }

    /// Widest entry among the observed shapes, never less than one byte.
    #[must_use]
    pub fn entry_stride(&self, sizes: &FieldSize) -> usize {
        let stat = self.ref_array.unwrap_or_default();
        [
            if stat.key_foreign { sizes.key_foreign } else { 0 },
            if stat.key_self { sizes.key } else { 0 },
            if stat.string { sizes.string } else { 0 },
            if stat.numeric32 { sizes.long } else { 0 },
            sizes.byte,
        ]
        .into_iter()
        .max()
        .unwrap_or(sizes.byte)
    }
}
