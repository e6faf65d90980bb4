//! Drawing surface abstraction
//!
//! The renderer only needs two primitives from its host: set the current
//! fill color and draw a run of text at a pixel position.

use serde::{Deserialize, Serialize};

use super::theme::Color;

/// Width of one monospace character, in pixels
pub const CHARACTER_WIDTH: f64 = 7.0;

/// Height of one painted row, in pixels
pub const LINE_HEIGHT: f64 = 20.0;

/// Font metrics of the host surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    /// Advance of one character
    pub character_width: f64,
    /// Vertical step between rows
    pub line_height: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            character_width: CHARACTER_WIDTH,
            line_height: LINE_HEIGHT,
        }
    }
}

impl Metrics {
    /// Y coordinate of the `n`th painted line
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn line_y(&self, n: usize) -> f64 {
        n as f64 * self.line_height
    }

    /// X coordinate of byte column `n` in a hex dump (three characters per byte)
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hex_x(&self, n: usize) -> f64 {
        n as f64 * self.character_width * 3.0
    }
}

/// A stateful 2D paint target
pub trait Surface {
    /// Set the color used by subsequent `fill_text` calls
    fn set_fill_style(&mut self, color: Color);

    /// Draw `text` with its top-left corner at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// `set_fill_style`
    FillStyle(Color),
    /// `fill_text`
    FillText {
        /// Drawn text
        text: String,
        /// Left edge
        x: f64,
        /// Top edge
        y: f64,
    },
}

/// Surface that records every call, for tests and headless rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Create an empty recording
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls in order
    #[inline]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Number of `set_fill_style` calls
    pub fn color_switches(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::FillStyle(_)))
            .count()
    }

    /// `(text, color)` for every `fill_text`, with the color in effect at
    /// the time. Text drawn before any fill style is set has no color.
    pub fn painted(&self) -> Vec<(String, Option<Color>)> {
        let mut current = None;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                SurfaceOp::FillStyle(color) => current = Some(*color),
                SurfaceOp::FillText { text, .. } => out.push((text.clone(), current)),
            }
        }
        out
    }

    /// Drawn text only
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::FillText { text, .. } => Some(text.as_str()),
                SurfaceOp::FillStyle(_) => None,
            })
            .collect()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_fill_style(&mut self, color: Color) {
        self.ops.push(SurfaceOp::FillStyle(color));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(SurfaceOp::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_metrics_default() {
        let metrics = Metrics::default();
        assert_eq!(metrics.character_width, 7.0);
        assert_eq!(metrics.line_height, 20.0);
        assert_eq!(metrics.line_y(3), 60.0);
        assert_eq!(metrics.hex_x(2), 42.0);
    }

    #[test]
    fn f_metrics_partial_json() {
        let metrics: Metrics = serde_json::from_str(r#"{ "line_height": 16.0 }"#).unwrap();
        assert_eq!(metrics.line_height, 16.0);
        assert_eq!(metrics.character_width, CHARACTER_WIDTH);
    }

    #[test]
    fn f_recording_painted_tracks_color() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let mut surface = RecordingSurface::new();
        surface.fill_text("bare", 0.0, 0.0);
        surface.set_fill_style(red);
        surface.fill_text("a", 0.0, 0.0);
        surface.fill_text("b", 0.0, 20.0);
        surface.set_fill_style(blue);
        surface.fill_text("c", 0.0, 40.0);

        assert_eq!(
            surface.painted(),
            vec![
                ("bare".to_string(), None),
                ("a".to_string(), Some(red)),
                ("b".to_string(), Some(red)),
                ("c".to_string(), Some(blue)),
            ]
        );
        assert_eq!(surface.color_switches(), 2);
        assert_eq!(surface.texts(), ["bare", "a", "b", "c"]);
    }

    #[test]
    fn f_surface_through_mut_ref() {
        fn draw(surface: &mut dyn Surface) {
            surface.fill_text("x", 1.0, 2.0);
        }
        let mut surface = RecordingSurface::new();
        draw(&mut surface);
        assert_eq!(
            surface.ops(),
            [SurfaceOp::FillText {
                text: "x".into(),
                x: 1.0,
                y: 2.0
            }]
        );
        surface.clear();
        assert!(surface.ops().is_empty());
    }
}
