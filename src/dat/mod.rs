//! DAT table model
//!
//! Types for the pieces the renderer consumes from the external decoder:
//! column descriptors, decoded values, the table byte regions and the
//! per-column value reader. The binary container itself is parsed
//! elsewhere; [`MemoryTable`] is a stand-in backed by pre-decoded values.

mod column;
mod memory;
mod stats;
mod table;
mod value;

pub use column::{
    ColumnDescriptor, ColumnType, DecimalSpec, IntegerSpec, KeyKind, KeySpec, Marker, TypeTag,
};
pub use memory::{Fixture, MemoryColumn, MemoryTable};
pub use stats::{ColumnStats, RefArrayStats};
pub use table::{DatTable, FieldReader, FieldSize};
pub use value::Value;
