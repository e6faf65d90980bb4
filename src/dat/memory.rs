//! In-memory DAT table
//!
//! Holds the two byte regions plus canned decoded values per column. Stands
//! in for the external decoder in tests, benches and the fixture-driven CLI.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::column::ColumnDescriptor;
use super::stats::ColumnStats;
use super::table::{DatTable, FieldReader, FieldSize};
use super::value::Value;
use crate::error::{Error, Result};

/// A column descriptor with its decoded values, one per row.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryColumn {
    /// Column metadata
    pub descriptor: ColumnDescriptor,
    /// Decoded values indexed by row
    pub values: Vec<Value>,
    /// Analyzer summary, default when never analyzed
    pub stats: ColumnStats,
}

/// Table backed by owned buffers and pre-decoded column values
///
/// # Example
///
/// ```
/// use datview::dat::{ColumnDescriptor, ColumnType, DatTable, MemoryTable, Value};
///
/// let name = ColumnDescriptor::new(0, ColumnType::string()).named("Name");
/// let table = MemoryTable::new(8, 8).with_column(name.clone(), vec!["Oak".into()]);
///
/// let read = table.field_reader(&name).unwrap();
/// assert_eq!(read.read(0).unwrap(), Value::from("Oak"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTable {
    row_length: usize,
    memsize: usize,
    field_size: FieldSize,
    data_fixed: Vec<u8>,
    data_variable: Vec<u8>,
    columns: Vec<MemoryColumn>,
}

impl MemoryTable {
    /// Create an empty table with the given row width and pointer size
    #[must_use]
    pub fn new(row_length: usize, memsize: usize) -> Self {
        Self {
            row_length,
            memsize,
            field_size: FieldSize::for_memsize(memsize),
            data_fixed: Vec::new(),
            data_variable: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Set the fixed region
    #[must_use]
    pub fn with_fixed(mut self, data: Vec<u8>) -> Self {
        self.data_fixed = data;
        self
    }

    /// Set the variable region
    #[must_use]
    pub fn with_variable(mut self, data: Vec<u8>) -> Self {
        self.data_variable = data;
        self
    }

    /// Override the field widths
    #[must_use]
    pub fn with_field_size(mut self, field_size: FieldSize) -> Self {
        self.field_size = field_size;
        self
    }

    /// Add a column with its decoded values
    #[must_use]
    pub fn with_column(self, descriptor: ColumnDescriptor, values: Vec<Value>) -> Self {
        self.with_analyzed_column(descriptor, values, ColumnStats::default())
    }

    /// Add a column with its decoded values and analyzer stats
    #[must_use]
    pub fn with_analyzed_column(
        mut self,
        descriptor: ColumnDescriptor,
        values: Vec<Value>,
        stats: ColumnStats,
    ) -> Self {
        self.columns.push(MemoryColumn {
            descriptor,
            values,
            stats,
        });
        self
    }

    /// All columns in declaration order
    #[inline]
    pub fn columns(&self) -> &[MemoryColumn] {
        &self.columns
    }

    /// Look up a column descriptor by name
    pub fn column(&self, name: &str) -> Result<&ColumnDescriptor> {
        self.columns
            .iter()
            .map(|c| &c.descriptor)
            .find(|d| d.name.as_deref() == Some(name))
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// Stats recorded for a column
    pub fn stats(&self, column: &ColumnDescriptor) -> Result<&ColumnStats> {
        self.find(column).map(|c| &c.stats)
    }

    fn find(&self, column: &ColumnDescriptor) -> Result<&MemoryColumn> {
        self.columns
            .iter()
            .find(|c| c.descriptor.offset == column.offset && c.descriptor.ty == column.ty)
            .ok_or_else(|| Error::column_not_found(column.label()))
    }
}

impl DatTable for MemoryTable {
    fn row_count(&self) -> usize {
        let fixed_rows = self.data_fixed.len().checked_div(self.row_length).unwrap_or(0);
        self.columns
            .iter()
            .map(|c| c.values.len())
            .fold(fixed_rows, usize::max)
    }

    fn row_length(&self) -> usize {
        self.row_length
    }

    fn memsize(&self) -> usize {
        self.memsize
    }

    fn field_size(&self) -> &FieldSize {
        &self.field_size
    }

    fn data_fixed(&self) -> &[u8] {
        &self.data_fixed
    }

    fn data_variable(&self) -> &[u8] {
        &self.data_variable
    }

    fn field_reader(&self, column: &ColumnDescriptor) -> Result<Box<dyn FieldReader + '_>> {
        let values = self.find(column)?.values.as_slice();
        Ok(Box::new(move |row: usize| -> Result<Value> {
            values.get(row).cloned().ok_or(Error::RowOutOfBounds {
                row,
                len: values.len(),
            })
        }))
    }
}

/// A set of named tables loaded from JSON.
///
/// Column values are plain JSON and are coerced through each column's
/// declared type, so `5` in a key column becomes `Key(Some(5))`.
///
/// ```json
/// { "tables": { "Words": {
///     "row_length": 8, "memsize": 8,
///     "columns": [ { "name": "Text", "offset": 0, "type": { "string": {} },
///                    "values": ["Oak", ""] } ]
/// } } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    tables: BTreeMap<String, MemoryTable>,
}

#[derive(Deserialize)]
struct FixtureDef {
    tables: BTreeMap<String, TableDef>,
}

#[derive(Deserialize)]
struct TableDef {
    row_length: usize,
    memsize: usize,
    #[serde(default)]
    field_size: Option<FieldSize>,
    #[serde(default)]
    data_fixed: Vec<u8>,
    #[serde(default)]
    data_variable: Vec<u8>,
    #[serde(default)]
    columns: Vec<ColumnDef>,
}

#[derive(Deserialize)]
struct ColumnDef {
    #[serde(flatten)]
    descriptor: ColumnDescriptor,
    #[serde(default)]
    values: Vec<serde_json::Value>,
    #[serde(default)]
    stats: ColumnStats,
}

impl TableDef {
    fn into_table(self) -> Result<MemoryTable> {
        let mut table = MemoryTable::new(self.row_length, self.memsize)
            .with_fixed(self.data_fixed)
            .with_variable(self.data_variable);
        if let Some(field_size) = self.field_size {
            table = table.with_field_size(field_size);
        }
        for column in self.columns {
            let values = column
                .values
                .iter()
                .map(|json| Value::from_json(json, &column.descriptor.ty))
                .collect::<Result<Vec<_>>>()?;
            table = table.with_analyzed_column(column.descriptor, values, column.stats);
        }
        Ok(table)
    }
}

impl Fixture {
    /// Parse a fixture from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let def: FixtureDef = serde_json::from_str(json)?;
        let tables = def
            .tables
            .into_iter()
            .map(|(name, table)| table.into_table().map(|t| (name, t)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(Self { tables })
    }

    /// Read and parse a fixture file
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(e, path))?;
        Self::from_json(&json)
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Result<&MemoryTable> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// Table names in sorted order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
