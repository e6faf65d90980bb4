//! Decoded cell values

use super::column::{ColumnType, TypeTag};
use crate::error::{Error, Result};

/// A decoded field value, as produced by a [`FieldReader`](super::FieldReader).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean
    Boolean(bool),
    /// String
    String(String),
    /// Integer of any width
    Integer(i64),
    /// Floating point
    Decimal(f64),
    /// Row reference; `None` means no reference
    Key(Option<usize>),
    /// Array of scalars
    Array(Vec<Value>),
}

impl Value {
    /// Shape name used in mismatch errors
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Key(_) => "key",
            Self::Array(_) => "array",
        }
    }

    /// Interpret the value as a row index into another table.
    ///
    /// Keys and non-negative integers are indices; `Key(None)` is `None`.
    pub fn as_row_index(&self) -> Result<Option<usize>> {
        match self {
            Self::Key(key) => Ok(*key),
            Self::Integer(n) => usize::try_from(*n)
                .map(Some)
                .map_err(|_| Error::value_mismatch("row index", "negative integer")),
            other => Err(Error::value_mismatch("row index", other.kind_name())),
        }
    }

    /// Coerce a JSON value into the shape a column type declares.
    ///
    /// Used by fixture loading; JSON cannot tell a key from an integer, so
    /// the column type decides.
    pub fn from_json(json: &serde_json::Value, ty: &ColumnType) -> Result<Self> {
        let Some(tag) = ty.tag() else {
            return Err(Error::UnrecognizedColumnType {
                column: "<fixture>".to_string(),
            });
        };
        if ty.array {
            let items = json
                .as_array()
                .ok_or_else(|| Error::value_mismatch("array", json_kind(json)))?;
            return items
                .iter()
                .map(|item| scalar_from_json(item, tag))
                .collect::<Result<Vec<_>>>()
                .map(Self::Array);
        }
        scalar_from_json(json, tag)
    }
}

fn scalar_from_json(json: &serde_json::Value, tag: TypeTag) -> Result<Value> {
    let mismatch = || Error::value_mismatch(tag.name(), json_kind(json));
    match tag {
        TypeTag::Boolean => json.as_bool().map(Value::Boolean).ok_or_else(mismatch),
        TypeTag::String => json
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(mismatch),
        TypeTag::Integer => json.as_i64().map(Value::Integer).ok_or_else(mismatch),
        TypeTag::Decimal => json.as_f64().map(Value::Decimal).ok_or_else(mismatch),
        TypeTag::Key(_) => {
            if json.is_null() {
                return Ok(Value::Key(None));
            }
            json.as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(|n| Value::Key(Some(n)))
                .ok_or_else(mismatch)
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Option<usize>> for Value {
    fn from(value: Option<usize>) -> Self {
        Self::Key(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn f_row_index_from_key() {
        assert_eq!(Value::Key(Some(5)).as_row_index().unwrap(), Some(5));
        assert_eq!(Value::Key(None).as_row_index().unwrap(), None);
    }

    #[test]
    fn f_row_index_from_integer() {
        assert_eq!(Value::Integer(7).as_row_index().unwrap(), Some(7));
        assert!(Value::Integer(-1).as_row_index().is_err());
    }

    #[test]
    fn f_row_index_from_string_fails() {
        let err = Value::from("Oak").as_row_index().unwrap_err();
        assert!(err.to_string().contains("string"));
    }

    #[test]
    fn f_from_json_key_null() {
        let value = Value::from_json(&json!(null), &ColumnType::key_foreign()).unwrap();
        assert_eq!(value, Value::Key(None));
    }

    #[test]
    fn f_from_json_key_number() {
        let value = Value::from_json(&json!(12), &ColumnType::key_self()).unwrap();
        assert_eq!(value, Value::Key(Some(12)));
    }

    #[test]
    fn f_from_json_integer_array() {
        let ty = ColumnType::integer(false, 4).into_array();
        let value = Value::from_json(&json!([1, 2, 3]), &ty).unwrap();
        assert_eq!(value, Value::from(vec![1_i64, 2, 3]));
    }

    #[test]
    fn f_from_json_decimal_accepts_integer_literal() {
        let value = Value::from_json(&json!(3), &ColumnType::decimal()).unwrap();
        assert_eq!(value, Value::Decimal(3.0));
    }

    #[test]
    fn f_from_json_mismatch() {
        let err = Value::from_json(&json!("x"), &ColumnType::boolean()).unwrap_err();
        assert!(matches!(
            err,
            Error::ValueMismatch {
                expected: "boolean",
                found: "string"
            }
        ));
    }

    #[test]
    fn f_from_json_array_expected() {
        let ty = ColumnType::string().into_array();
        assert!(Value::from_json(&json!("a"), &ty).is_err());
    }

    #[test]
    fn f_from_vec_of_keys() {
        let value = Value::from(vec![Some(1_usize), None]);
        assert_eq!(
            value,
            Value::Array(vec![Value::Key(Some(1)), Value::Key(None)])
        );
    }
}
