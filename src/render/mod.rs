//! Content rendering engine
//!
//! Turns decoded column values into colored text lines on a [`Surface`].
//!
//! # Pipeline
//!
//! - [`Stringifier`] - one of twelve formatters, picked once per pass
//! - [`resolve_colors`] - palette for the active [`ThemeMode`]
//! - [`Reference`] - optional key lookup through a second column
//! - [`ContentRenderer`] - row loop, color switching, byte dumps
//! - [`Viewport`] - which rows a pass covers
//!
//! A pass is synchronous and only touches the surface it is given; the
//! same inputs always paint the same `(text, color)` sequence.

mod bytes;
mod painter;
mod reference;
mod stringify;
mod surface;
mod theme;
mod viewport;

pub use painter::ContentRenderer;
pub use reference::Reference;
pub use stringify::{Stringifier, StringifyOut};
pub use surface::{Metrics, RecordingSurface, Surface, SurfaceOp, CHARACTER_WIDTH, LINE_HEIGHT};
pub use theme::{resolve_colors, Color, ColorTable, SyntaxTag, ThemeMode};
pub use viewport::Viewport;
