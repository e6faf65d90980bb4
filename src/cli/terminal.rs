//! Terminal-backed drawing surface
//!
//! Pixel coordinates map onto a character grid using the render metrics:
//! one cell per `character_width`, one line per `line_height`.

use std::collections::BTreeMap;
use std::io::Write;

use crossterm::{
    queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
};

use crate::render::{Color, Metrics, Surface};

#[derive(Debug, Clone)]
struct Span {
    column: usize,
    text: String,
    color: Option<Color>,
}

/// Buffers painted text by line, then writes it out with ANSI colors.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    metrics: Metrics,
    color: Option<Color>,
    lines: BTreeMap<usize, Vec<Span>>,
    styled: bool,
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn cell(position: f64, unit: f64) -> usize {
    if unit <= 0.0 || !position.is_finite() {
        return 0;
    }
    (position / unit).round().max(0.0) as usize
}

impl TerminalSurface {
    /// Create an empty surface
    #[must_use]
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            color: None,
            lines: BTreeMap::new(),
            styled: true,
        }
    }

    /// Emit plain text without color escapes
    #[must_use]
    pub fn plain(mut self) -> Self {
        self.styled = false;
        self
    }

    /// Painted lines as plain text, blank lines included up to the last
    /// painted one
    pub fn lines(&self) -> Vec<String> {
        let Some(&last) = self.lines.keys().next_back() else {
            return Vec::new();
        };
        (0..=last)
            .map(|n| {
                let mut line = String::new();
                for span in self.lines.get(&n).map(Vec::as_slice).unwrap_or_default() {
                    pad_to(&mut line, span.column);
                    line.push_str(&span.text);
                }
                line
            })
            .collect()
    }

    /// Write all painted lines to `out`
    pub fn flush_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let Some(&last) = self.lines.keys().next_back() else {
            return Ok(());
        };
        for n in 0..=last {
            let mut width = 0;
            for span in self.lines.get(&n).map(Vec::as_slice).unwrap_or_default() {
                if span.column > width {
                    queue!(out, Print(" ".repeat(span.column - width)))?;
                    width = span.column;
                }
                match (self.styled, span.color) {
                    (true, Some(color)) => queue!(
                        out,
                        SetForegroundColor(TermColor::Rgb {
                            r: color.r,
                            g: color.g,
                            b: color.b,
                        }),
                        Print(&span.text),
                        ResetColor
                    )?,
                    _ => queue!(out, Print(&span.text))?,
                }
                width += span.text.chars().count();
            }
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }
}

fn pad_to(line: &mut String, column: usize) {
    let width = line.chars().count();
    if column > width {
        line.extend(std::iter::repeat(' ').take(column - width));
    }
}

impl Surface for TerminalSurface {
    fn set_fill_style(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let line = cell(y, self.metrics.line_height);
        let spans = self.lines.entry(line).or_default();
        spans.push(Span {
            column: cell(x, self.metrics.character_width),
            text: text.to_string(),
            color: self.color,
        });
        spans.sort_by_key(|span| span.column);
    }
}
