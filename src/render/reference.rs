//! Reference resolution
//!
//! A key column's raw value is a row index. With a [`Reference`] attached
//! the painter shows the referenced column's value at that row instead.

use std::fmt;

use super::stringify::{write_key, write_list, Stringifier, StringifyOut};
use crate::dat::{ColumnDescriptor, DatTable, FieldReader, KeyKind, Value};
use crate::error::{Error, Result};

/// Second column/table pair to look primary values up in
#[derive(Clone, Copy)]
pub struct Reference<'a> {
    /// Column displayed in place of the raw index
    pub column: &'a ColumnDescriptor,
    /// Table holding that column
    pub table: &'a dyn DatTable,
}

impl<'a> Reference<'a> {
    /// Pair a column with its table
    #[must_use]
    pub fn new(column: &'a ColumnDescriptor, table: &'a dyn DatTable) -> Self {
        Self { column, table }
    }
}

impl fmt::Debug for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("column", &self.column)
            .field("rows", &self.table.row_count())
            .finish()
    }
}

/// Key kind used for a primary column's null rows. Non-key columns never
/// read as null keys, so the choice there only matters for malformed data.
fn null_kind(column: &ColumnDescriptor) -> KeyKind {
    match column.ty.key {
        Some(key) if !key.foreign => KeyKind::SelfRef,
        _ => KeyKind::Foreign,
    }
}

/// Per-pass reading plan, resolved once before the row loop.
pub(crate) enum CellSource<'a> {
    /// No reference: primary value, primary formatter
    Direct {
        read: Box<dyn FieldReader + 'a>,
        stringifier: Stringifier,
    },
    /// Scalar primary looked up through the reference
    Scalar {
        read: Box<dyn FieldReader + 'a>,
        lookup: Box<dyn FieldReader + 'a>,
        stringifier: Stringifier,
        null: Stringifier,
    },
    /// Array of indices, each looked up through the reference
    Array {
        read: Box<dyn FieldReader + 'a>,
        lookup: Box<dyn FieldReader + 'a>,
        element: Stringifier,
        null: KeyKind,
    },
}

impl fmt::Debug for CellSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { stringifier, .. } => {
                f.debug_tuple("Direct").field(stringifier).finish()
            }
            Self::Scalar { stringifier, .. } => {
                f.debug_tuple("Scalar").field(stringifier).finish()
            }
            Self::Array { element, .. } => f.debug_tuple("Array").field(element).finish(),
        }
    }
}

impl<'a> CellSource<'a> {
    /// Validate the pairing and pick formatters and readers.
    ///
    /// Fails on a referenced array column or an unrecognized type before
    /// anything is read.
    pub(crate) fn resolve(
        column: &'a ColumnDescriptor,
        table: &'a dyn DatTable,
        reference: Option<Reference<'a>>,
    ) -> Result<Self> {
        let Some(reference) = reference else {
            let stringifier = Stringifier::for_column(column)?;
            return Ok(Self::Direct {
                read: table.field_reader(column)?,
                stringifier,
            });
        };

        if reference.column.is_array() {
            return Err(Error::ArrayOfArrays);
        }
        let stringifier = Stringifier::select(reference.column.tag()?, column.is_array());
        let read = table.field_reader(column)?;
        let lookup = reference.table.field_reader(reference.column)?;

        if column.is_array() {
            Ok(Self::Array {
                read,
                lookup,
                element: stringifier.element(),
                null: null_kind(column),
            })
        } else {
            Ok(Self::Scalar {
                read,
                lookup,
                stringifier,
                null: Stringifier::null_key(null_kind(column)),
            })
        }
    }

    /// Resolve and format one row into `out`.
    pub(crate) fn render_row(&self, row: usize, out: &mut StringifyOut) -> Result<()> {
        match self {
            Self::Direct { read, stringifier } => stringifier.stringify(&read.read(row)?, out),
            Self::Scalar {
                read,
                lookup,
                stringifier,
                null,
            } => {
                let value = read.read(row)?;
                match value.as_row_index()? {
                    None => null.stringify(&value, out),
                    Some(index) => stringifier.stringify(&lookup.read(index)?, out),
                }
            }
            Self::Array {
                read,
                lookup,
                element,
                null,
            } => {
                let value = read.read(row)?;
                let Value::Array(indices) = value else {
                    return Err(Error::value_mismatch("array", value.kind_name()));
                };
                out.text.clear();
                write_list(&mut out.text, &indices, |text, index| {
                    match index.as_row_index()? {
                        None => write_key(None, *null, text),
                        Some(index) => element.write_element(&lookup.read(index)?, text)?,
                    }
                    Ok(())
                })?;
                out.tag = element.tag();
                Ok(())
            }
        }
    }
}
