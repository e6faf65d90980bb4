//! Column descriptors
//!
//! A column is a byte offset within the fixed row plus a type record. The
//! type record mirrors the decoder's header schema: a set of optional flags
//! of which exactly one is expected to be present, and an orthogonal
//! `array` flag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Empty marker for flag-only type entries (`"string": {}`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {}

/// Integer width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerSpec {
    /// Unsigned integer
    #[serde(default)]
    pub unsigned: bool,
    /// Width in bytes
    pub size: u8,
}

/// Floating point width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalSpec {
    /// Width in bytes
    pub size: u8,
}

/// Row reference flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// References another table rather than this one
    #[serde(default)]
    pub foreign: bool,
}

/// Which table a key column points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Row index within the same table
    SelfRef,
    /// Row index within a different table
    Foreign,
}

/// Resolved scalar type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `true` / `false`
    Boolean,
    /// UTF-16 string from the variable region
    String,
    /// Signed or unsigned integer
    Integer,
    /// Floating point
    Decimal,
    /// Row reference
    Key(KeyKind),
}

impl TypeTag {
    /// Short lowercase name used in messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Key(KeyKind::SelfRef) => "key (self)",
            Self::Key(KeyKind::Foreign) => "key (foreign)",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type record of a column as declared by the decoder's header schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnType {
    /// Field holds `(length, offset)` into the variable region
    pub array: bool,
    /// Boolean flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean: Option<Marker>,
    /// String flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string: Option<Marker>,
    /// Integer flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer: Option<IntegerSpec>,
    /// Decimal flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal: Option<DecimalSpec>,
    /// Key flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeySpec>,
}

impl ColumnType {
    /// Boolean column
    #[must_use]
    pub fn boolean() -> Self {
        Self {
            boolean: Some(Marker {}),
            ..Self::default()
        }
    }

    /// String column
    #[must_use]
    pub fn string() -> Self {
        Self {
            string: Some(Marker {}),
            ..Self::default()
        }
    }

    /// Integer column of the given width
    #[must_use]
    pub fn integer(unsigned: bool, size: u8) -> Self {
        Self {
            integer: Some(IntegerSpec { unsigned, size }),
            ..Self::default()
        }
    }

    /// 32-bit float column
    #[must_use]
    pub fn decimal() -> Self {
        Self {
            decimal: Some(DecimalSpec { size: 4 }),
            ..Self::default()
        }
    }

    /// Self-referencing key column
    #[must_use]
    pub fn key_self() -> Self {
        Self {
            key: Some(KeySpec { foreign: false }),
            ..Self::default()
        }
    }

    /// Foreign key column
    #[must_use]
    pub fn key_foreign() -> Self {
        Self {
            key: Some(KeySpec { foreign: true }),
            ..Self::default()
        }
    }

    /// Same scalar type, stored as an array
    #[must_use]
    pub fn into_array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Resolve the scalar type tag.
    ///
    /// Flags are checked in a fixed order (boolean, string, integer,
    /// decimal, key); the first present one wins. `None` when no flag is
    /// set.
    #[must_use]
    pub fn tag(&self) -> Option<TypeTag> {
        if self.boolean.is_some() {
            return Some(TypeTag::Boolean);
        }
        if self.string.is_some() {
            return Some(TypeTag::String);
        }
        if self.integer.is_some() {
            return Some(TypeTag::Integer);
        }
        if self.decimal.is_some() {
            return Some(TypeTag::Decimal);
        }
        self.key.map(|key| {
            if key.foreign {
                TypeTag::Key(KeyKind::Foreign)
            } else {
                TypeTag::Key(KeyKind::SelfRef)
            }
        })
    }
}

/// One field of a fixed-width row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, when the schema provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Byte offset within the fixed row
    pub offset: usize,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: ColumnType,
    /// Display width hint, caps the raw array dump
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
}

impl ColumnDescriptor {
    /// Create an unnamed column
    #[must_use]
    pub fn new(offset: usize, ty: ColumnType) -> Self {
        Self {
            name: None,
            offset,
            ty,
            text_length: None,
        }
    }

    /// Set the column name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the display width hint
    #[must_use]
    pub fn with_text_length(mut self, text_length: usize) -> Self {
        self.text_length = Some(text_length);
        self
    }

    /// Whether the field is an array
    #[inline]
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.ty.array
    }

    /// Name for messages: the column name, or `@offset` when unnamed
    #[must_use]
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("@{}", self.offset),
        }
    }

    /// Resolve the scalar type tag, failing on a descriptor with no flags.
    pub fn tag(&self) -> Result<TypeTag> {
        self.ty.tag().ok_or_else(|| Error::UnrecognizedColumnType {
            column: self.label(),
        })
    }
}
