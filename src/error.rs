//! Error types for datview.

use std::path::PathBuf;

/// Result type alias for datview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering DAT table content.
///
/// `ArrayOfArrays` and `UnrecognizedColumnType` are caller contract
/// violations; a render pass reports them before touching the surface.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A reference points at an array-typed column.
    #[error("Can't show array of arrays")]
    ArrayOfArrays,

    /// Column descriptor carries none of the recognized type flags.
    #[error("Unrecognized type for column {column}")]
    UnrecognizedColumnType {
        /// Column name, or its offset when unnamed.
        column: String,
    },

    /// Decoded value does not have the shape the column type promises.
    #[error("Value mismatch: expected {expected}, found {found}")]
    ValueMismatch {
        /// Shape the selected formatter expects.
        expected: &'static str,
        /// Shape the decoder produced.
        found: &'static str,
    },

    /// Row index past the end of a table.
    #[error("Row {row} out of bounds for table with {len} rows")]
    RowOutOfBounds {
        /// The requested row.
        row: usize,
        /// Number of rows in the table.
        len: usize,
    },

    /// Byte read past the end of a data region.
    #[error("Read at byte {offset} out of bounds for region of {len} bytes")]
    OutOfBounds {
        /// Byte offset of the read.
        offset: usize,
        /// Length of the region.
        len: usize,
    },

    /// Column not found in a table.
    #[error("Column '{name}' not found")]
    ColumnNotFound {
        /// The name (or offset) of the missing column.
        name: String,
    },

    /// Table not found in a fixture.
    #[error("Table '{name}' not found")]
    TableNotFound {
        /// The name of the missing table.
        name: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Self::TableNotFound { name: name.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a value mismatch error.
    #[must_use]
    pub fn value_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::ValueMismatch { expected, found }
    }

    /// True for the two errors that signal a caller contract violation.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::ArrayOfArrays | Self::UnrecognizedColumnType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_of_arrays_message() {
        let err = Error::ArrayOfArrays;
        assert_eq!(err.to_string(), "Can't show array of arrays");
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_unrecognized_column_type() {
        let err = Error::UnrecognizedColumnType {
            column: "BaseItemTypesKey".to_string(),
        };
        assert!(err.to_string().contains("BaseItemTypesKey"));
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_value_mismatch() {
        let err = Error::value_mismatch("integer", "string");
        let msg = err.to_string();
        assert!(msg.contains("integer"));
        assert!(msg.contains("string"));
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_row_out_of_bounds() {
        let err = Error::RowOutOfBounds { row: 10, len: 5 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_out_of_bounds() {
        let err = Error::OutOfBounds {
            offset: 64,
            len: 60,
        };
        assert!(err.to_string().contains("64"));
        assert!(err.to_string().contains("60"));
    }

    #[test]
    fn test_column_not_found() {
        let err = Error::column_not_found("Id");
        assert!(err.to_string().contains("Id"));
    }

    #[test]
    fn test_table_not_found() {
        let err = Error::table_not_found("Mods");
        assert!(err.to_string().contains("Mods"));
    }

    #[test]
    fn test_invalid_config() {
        let err = Error::invalid_config("line_height must be positive");
        assert!(err.to_string().contains("line_height must be positive"));
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io(io_err, "/path/to/fixture.json");
        assert!(err.to_string().contains("/path/to/fixture.json"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_io_error_without_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io_no_path(io_err);
        assert!(err.to_string().contains("None"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
