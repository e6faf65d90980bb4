//! Syntax colors and contrast themes

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Semantic color tag attached to every formatted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxTag {
    /// Integers and decimals
    Number,
    /// `true` / `false`
    Boolean,
    /// Non-empty strings
    String,
    /// Null keys
    Null,
    /// Row references
    Key,
    /// Empty strings
    Muted,
    /// Raw byte dumps
    Hex,
}

impl SyntaxTag {
    /// All tags, in palette order
    pub const ALL: [Self; 7] = [
        Self::Number,
        Self::Boolean,
        Self::String,
        Self::Null,
        Self::Key,
        Self::Muted,
        Self::Hex,
    ];
}

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Create a color from components
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{s}', expected #rrggbb")))
    }
}

/// Concrete colors for the seven syntax tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTable {
    /// Numbers
    pub number: Color,
    /// Booleans
    pub boolean: Color,
    /// Strings
    pub string: Color,
    /// Null keys
    pub null: Color,
    /// Keys
    pub key: Color,
    /// Empty / muted values
    pub muted: Color,
    /// Hex dumps
    pub hex: Color,
}

impl ColorTable {
    /// Dark syntax palette
    pub const STANDARD: Self = Self {
        number: Color::rgb(0x4a, 0xde, 0x80),
        boolean: Color::rgb(0x60, 0xa5, 0xfa),
        string: Color::rgb(0xfb, 0xbf, 0x24),
        null: Color::rgb(0xf8, 0x71, 0x71),
        key: Color::rgb(0xa7, 0x8b, 0xfa),
        muted: Color::rgb(0x64, 0x74, 0x8b),
        hex: Color::rgb(0x94, 0xa3, 0xb8),
    };

    /// Same hues, lighter shades
    pub const HIGH_CONTRAST: Self = Self {
        number: Color::rgb(0x86, 0xef, 0xac),
        boolean: Color::rgb(0x93, 0xc5, 0xfd),
        string: Color::rgb(0xfd, 0xe6, 0x8a),
        null: Color::rgb(0xfc, 0xa5, 0xa5),
        key: Color::rgb(0xc4, 0xb5, 0xfd),
        muted: Color::rgb(0xcb, 0xd5, 0xe1),
        hex: Color::rgb(0xe2, 0xe8, 0xf0),
    };

    /// Color for a tag
    #[inline]
    #[must_use]
    pub fn get(&self, tag: SyntaxTag) -> Color {
        match tag {
            SyntaxTag::Number => self.number,
            SyntaxTag::Boolean => self.boolean,
            SyntaxTag::String => self.string,
            SyntaxTag::Null => self.null,
            SyntaxTag::Key => self.key,
            SyntaxTag::Muted => self.muted,
            SyntaxTag::Hex => self.hex,
        }
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Active contrast theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Regular palette
    #[default]
    Standard,
    /// Lighter palette for high-contrast displays
    HighContrast,
}

impl ThemeMode {
    /// Map the host's high-contrast predicate to a mode
    #[must_use]
    pub fn from_high_contrast(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HighContrast
        } else {
            Self::Standard
        }
    }

    /// Whether this is the high-contrast mode
    #[must_use]
    pub fn is_high_contrast(self) -> bool {
        self == Self::HighContrast
    }
}

/// Color table for a theme. Pure; call once per render pass.
#[must_use]
pub fn resolve_colors(mode: ThemeMode) -> ColorTable {
    match mode {
        ThemeMode::Standard => ColorTable::STANDARD,
        ThemeMode::HighContrast => ColorTable::HIGH_CONTRAST,
    }
}
