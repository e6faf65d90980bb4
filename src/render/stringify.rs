//! Type-directed cell formatting
//!
//! A [`Stringifier`] is picked once per render pass from the column's
//! array flag and type tag, then applied to every row. Formatting output is
//! part of the display contract:
//!
//! | type          | value        | text            | tag       |
//! |---------------|--------------|-----------------|-----------|
//! | integer       | `-7`         | `-7`            | `Number`  |
//! | decimal       | `3.0`        | `3.0`           | `Number`  |
//! | boolean       | `true`       | `true`          | `Boolean` |
//! | string        | `""`         | `empty`         | `Muted`   |
//! | string        | `"Fireball"` | `Fireball`      | `String`  |
//! | key (self)    | null / `4`   | `<null, self>` / `<4, self>` | `Null` / `Key` |
//! | key (foreign) | null / `4`   | `<null>` / `<4>` | `Null` / `Key` |
//!
//! Arrays render as `[a, b, c]` in the scalar's tag, with strings
//! JSON-quoted.

use std::fmt::Write;

use super::theme::SyntaxTag;
use crate::dat::{ColumnDescriptor, KeyKind, TypeTag, Value};
use crate::error::{Error, Result};

/// Formatted cell: reusable text buffer plus its color tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOut {
    /// Display text
    pub text: String,
    /// Semantic color
    pub tag: SyntaxTag,
}

impl Default for StringifyOut {
    fn default() -> Self {
        Self {
            text: String::new(),
            tag: SyntaxTag::Muted,
        }
    }
}

impl StringifyOut {
    fn set(&mut self, text: &str, tag: SyntaxTag) {
        self.text.clear();
        self.text.push_str(text);
        self.tag = tag;
    }
}

/// One of the twelve leaf formatters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stringifier {
    /// Scalar boolean
    Boolean,
    /// Scalar string
    String,
    /// Scalar integer
    Integer,
    /// Scalar decimal
    Decimal,
    /// Scalar foreign key
    KeyForeign,
    /// Scalar self key
    KeySelf,
    /// Boolean array
    BooleanArray,
    /// String array
    StringArray,
    /// Integer array
    IntegerArray,
    /// Decimal array
    DecimalArray,
    /// Foreign key array
    KeyForeignArray,
    /// Self key array
    KeySelfArray,
}

impl Stringifier {
    /// Pick the formatter for a type tag and array flag.
    #[must_use]
    pub fn select(tag: TypeTag, array: bool) -> Self {
        match (array, tag) {
            (false, TypeTag::Boolean) => Self::Boolean,
            (false, TypeTag::String) => Self::String,
            (false, TypeTag::Integer) => Self::Integer,
            (false, TypeTag::Decimal) => Self::Decimal,
            (false, TypeTag::Key(KeyKind::Foreign)) => Self::KeyForeign,
            (false, TypeTag::Key(KeyKind::SelfRef)) => Self::KeySelf,
            (true, TypeTag::Boolean) => Self::BooleanArray,
            (true, TypeTag::String) => Self::StringArray,
            (true, TypeTag::Integer) => Self::IntegerArray,
            (true, TypeTag::Decimal) => Self::DecimalArray,
            (true, TypeTag::Key(KeyKind::Foreign)) => Self::KeyForeignArray,
            (true, TypeTag::Key(KeyKind::SelfRef)) => Self::KeySelfArray,
        }
    }

    /// Formatter for a column's own type.
    ///
    /// Fails when the descriptor carries no recognized type flag.
    pub fn for_column(column: &ColumnDescriptor) -> Result<Self> {
        Ok(Self::select(column.tag()?, column.is_array()))
    }

    /// Null-key formatter for a key kind
    #[must_use]
    pub fn null_key(kind: KeyKind) -> Self {
        match kind {
            KeyKind::Foreign => Self::KeyForeign,
            KeyKind::SelfRef => Self::KeySelf,
        }
    }

    /// Whether this formatter takes an array value
    #[must_use]
    pub fn is_array(self) -> bool {
        matches!(
            self,
            Self::BooleanArray
                | Self::StringArray
                | Self::IntegerArray
                | Self::DecimalArray
                | Self::KeyForeignArray
                | Self::KeySelfArray
        )
    }

    /// Scalar formatter for array elements; identity for scalars
    #[must_use]
    pub fn element(self) -> Self {
        match self {
            Self::BooleanArray => Self::Boolean,
            Self::StringArray => Self::String,
            Self::IntegerArray => Self::Integer,
            Self::DecimalArray => Self::Decimal,
            Self::KeyForeignArray => Self::KeyForeign,
            Self::KeySelfArray => Self::KeySelf,
            scalar => scalar,
        }
    }

    /// Color tag for a non-null, non-empty value
    #[must_use]
    pub fn tag(self) -> SyntaxTag {
        match self.element() {
            Self::Boolean => SyntaxTag::Boolean,
            Self::String => SyntaxTag::String,
            Self::Integer | Self::Decimal => SyntaxTag::Number,
            _ => SyntaxTag::Key,
        }
    }

    /// Format `value` into `out`.
    pub fn stringify(self, value: &Value, out: &mut StringifyOut) -> Result<()> {
        if self.is_array() {
            let Value::Array(items) = value else {
                return Err(Error::value_mismatch("array", value.kind_name()));
            };
            let element = self.element();
            out.text.clear();
            write_list(&mut out.text, items, |text, item| {
                element.write_element(item, text)
            })?;
            out.tag = self.tag();
            return Ok(());
        }

        match (self, value) {
            (Self::String, Value::String(s)) if s.is_empty() => {
                out.set("empty", SyntaxTag::Muted);
            }
            (Self::String, Value::String(s)) => out.set(s, SyntaxTag::String),
            (Self::KeySelf, Value::Key(None)) => out.set("<null, self>", SyntaxTag::Null),
            (Self::KeyForeign, Value::Key(None)) => out.set("<null>", SyntaxTag::Null),
            _ => {
                out.text.clear();
                self.write_element(value, &mut out.text)?;
                out.tag = self.tag();
            }
        }
        Ok(())
    }

    /// Append the in-array rendering of one scalar.
    ///
    /// Strings are JSON-quoted and never collapse to `empty`.
    pub(crate) fn write_element(self, value: &Value, text: &mut String) -> Result<()> {
        match (self, value) {
            (Self::Boolean, Value::Boolean(b)) => text.push_str(if *b { "true" } else { "false" }),
            (Self::String, Value::String(s)) => text.push_str(&serde_json::to_string(s)?),
            (Self::Integer, Value::Integer(n)) => {
                let _ = write!(text, "{n}");
            }
            (Self::Decimal, Value::Decimal(d)) => write_decimal(*d, text),
            (Self::KeyForeign, Value::Key(key)) => write_key(*key, KeyKind::Foreign, text),
            (Self::KeySelf, Value::Key(key)) => write_key(*key, KeyKind::SelfRef, text),
            (formatter, value) => {
                return Err(Error::value_mismatch(
                    formatter.expected_kind(),
                    value.kind_name(),
                ))
            }
        }
        Ok(())
    }

    fn expected_kind(self) -> &'static str {
        match self.element() {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            _ => "key",
        }
    }
}

/// Append `[a, b, c]`, writing each item with `write`.
pub(crate) fn write_list<T, F>(text: &mut String, items: &[T], mut write: F) -> Result<()>
where
    F: FnMut(&mut String, &T) -> Result<()>,
{
    text.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            text.push_str(", ");
        }
        write(text, item)?;
    }
    text.push(']');
    Ok(())
}

/// Append `<N>`, `<N, self>`, `<null>` or `<null, self>`.
pub(crate) fn write_key(key: Option<usize>, kind: KeyKind, text: &mut String) {
    text.push('<');
    match key {
        Some(n) => {
            let _ = write!(text, "{n}");
        }
        None => text.push_str("null"),
    }
    if kind == KeyKind::SelfRef {
        text.push_str(", self");
    }
    text.push('>');
}

const MAX_FRACTION_DIGITS: usize = 6;

/// Append a decimal with 1 to 6 fraction digits and en-US digit grouping.
///
/// Rounding works on the shortest round-trip digits of `value`, half away
/// from zero, so `0.0078125` prints `0.007813` and `1e23` prints its
/// shortest digits padded with zeros.
pub(crate) fn write_decimal(value: f64, text: &mut String) {
    if value.is_nan() {
        text.push_str("NaN");
        return;
    }
    if value.is_sign_negative() {
        text.push('-');
    }
    if value.is_infinite() {
        text.push('∞');
        return;
    }

    let (int, frac) = rounded_digits(value.abs(), MAX_FRACTION_DIGITS);
    if int.is_empty() {
        text.push('0');
    }
    for (i, &d) in int.iter().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            text.push(',');
        }
        text.push(char::from(d));
    }

    text.push('.');
    let keep = frac.iter().rposition(|&d| d != b'0').map_or(1, |i| i + 1);
    for i in 0..keep {
        text.push(char::from(frac.get(i).copied().unwrap_or(b'0')));
    }
}

/// Integer and fraction digits (ASCII) of a finite non-negative `value`,
/// rounded half away from zero to at most `places` fraction digits.
fn rounded_digits(value: f64, places: usize) -> (Vec<u8>, Vec<u8>) {
    let sci = format!("{value:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: isize = exp.parse().unwrap_or(0);
    let mut digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();

    // Digits before the decimal point
    let mut point = exp.saturating_add(1);
    if point < 0 {
        digits.splice(0..0, std::iter::repeat(b'0').take(point.unsigned_abs()));
        point = 0;
    }
    let mut point = point.unsigned_abs();
    if digits.len() < point {
        digits.resize(point, b'0');
    }

    let cut = point + places;
    let round_up = digits.get(cut).is_some_and(|&d| d >= b'5');
    digits.truncate(cut);
    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
            point += 1;
        }
    }

    let frac = digits.split_off(point);
    (digits, frac)
}
