//! Row-stream painter

use tracing::{debug_span, trace};

use super::reference::{CellSource, Reference};
use super::stringify::StringifyOut;
use super::surface::{Metrics, Surface};
use super::theme::{resolve_colors, Color, ColorTable};
use crate::config::RenderConfig;
use crate::dat::{ColumnDescriptor, DatTable};
use crate::error::Result;

/// Paints decoded column content one row per line.
///
/// Colors are resolved when the renderer is built, so every pass through
/// one renderer uses a single palette. Build a new renderer to pick up a
/// theme change.
///
/// # Example
///
/// ```
/// use datview::dat::{ColumnDescriptor, ColumnType, MemoryTable};
/// use datview::render::{ContentRenderer, RecordingSurface};
/// use datview::RenderConfig;
///
/// let level = ColumnDescriptor::new(0, ColumnType::integer(false, 4));
/// let table = MemoryTable::new(4, 8).with_column(level.clone(), vec![1_i64.into(), 2_i64.into()]);
///
/// let mut surface = RecordingSurface::new();
/// let renderer = ContentRenderer::new(&RenderConfig::default());
/// renderer
///     .render_cell_content(&mut surface, &level, &table, &[1, 0], None)
///     .unwrap();
/// assert_eq!(surface.texts(), ["2", "1"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRenderer {
    pub(crate) colors: ColorTable,
    pub(crate) metrics: Metrics,
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl ContentRenderer {
    /// Build a renderer for one frame's theme and metrics
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            colors: resolve_colors(config.theme),
            metrics: config.metrics,
        }
    }

    /// Palette in use
    #[inline]
    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    /// Metrics in use
    #[inline]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Paint `column` for each of `rows`, top to bottom from `y = 0`.
    ///
    /// With a `reference`, key values are displayed as the referenced
    /// column's value at that row. Null keys skip the lookup.
    ///
    /// # Errors
    ///
    /// `ArrayOfArrays` when the reference column is an array and
    /// `UnrecognizedColumnType` for a descriptor with no type flag; both
    /// are reported before anything is painted. Decoder errors abort the
    /// pass at the failing row.
    pub fn render_cell_content(
        &self,
        surface: &mut dyn Surface,
        column: &ColumnDescriptor,
        table: &dyn DatTable,
        rows: &[usize],
        reference: Option<Reference<'_>>,
    ) -> Result<()> {
        let _span = debug_span!(
            "render_cell_content",
            column = %column.label(),
            rows = rows.len(),
            referenced = reference.is_some()
        )
        .entered();

        let source = CellSource::resolve(column, table, reference)?;
        trace!(?source, "resolved cell source");

        let mut out = StringifyOut::default();
        let mut prev: Option<Color> = None;
        for (line, &row) in rows.iter().enumerate() {
            source.render_row(row, &mut out)?;

            let color = self.colors.get(out.tag);
            if prev != Some(color) {
                trace!(row, %color, "fill style");
                surface.set_fill_style(color);
                prev = Some(color);
            }
            surface.fill_text(&out.text, 0.0, self.metrics.line_y(line));
        }
        Ok(())
    }
}
