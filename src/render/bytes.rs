//! Raw byte views
//!
//! Two dumps of undecoded data: a byte range of the fixed row, and the
//! variable-region payload an array column points at. Both paint in the
//! hex color and advance one line per row like the content painter.

use std::fmt::Write;

use tracing::debug_span;

use super::painter::ContentRenderer;
use super::surface::Surface;
use super::theme::SyntaxTag;
use crate::dat::{ColumnDescriptor, ColumnStats, DatTable};
use crate::error::Result;

/// Append bytes as space-separated lowercase hex pairs.
pub(crate) fn write_hex(bytes: &[u8], text: &mut String) {
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        let _ = write!(text, "{b:02x}");
    }
}

/// `bytes[start..end]`, clamped to the buffer. Empty when `start >= end`.
pub(crate) fn clamped(bytes: &[u8], start: usize, end: usize) -> &[u8] {
    let end = end.min(bytes.len());
    let start = start.min(end);
    &bytes[start..end]
}

/// Row start in the fixed region, saturating on overflow
fn row_base(table: &dyn DatTable, row: usize, column: &ColumnDescriptor) -> usize {
    row.saturating_mul(table.row_length())
        .saturating_add(column.offset)
}

impl ContentRenderer {
    /// Hex dump of bytes `[begin, end)` of `column` for each row.
    ///
    /// Text starts at `x = begin * 3 * character_width`, so dumps of
    /// adjacent ranges of one row line up as a single run. Ranges past the
    /// end of the fixed region are truncated.
    pub fn draw_byte_view(
        &self,
        surface: &mut dyn Surface,
        column: &ColumnDescriptor,
        table: &dyn DatTable,
        rows: &[usize],
        begin: usize,
        end: usize,
    ) {
        let _span = debug_span!("draw_byte_view", offset = column.offset, begin, end).entered();

        surface.set_fill_style(self.colors.get(SyntaxTag::Hex));
        let x = self.metrics.hex_x(begin);
        let fixed = table.data_fixed();
        let mut text = String::new();
        for (line, &row) in rows.iter().enumerate() {
            let base = row_base(table, row, column);
            text.clear();
            write_hex(
                clamped(fixed, base.saturating_add(begin), base.saturating_add(end)),
                &mut text,
            );
            surface.fill_text(&text, x, self.metrics.line_y(line));
        }
    }

    /// Raw variable-region dump of an array column for each row.
    ///
    /// Paints `[]` for empty arrays, otherwise `N { hex }` where the dump
    /// covers `min(stride * N, ceil(text_length / 3))` bytes from the
    /// array's offset. The stride is the widest entry shape in `stats`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` when the length or offset word lies past the fixed
    /// region. Rows before the failing one stay painted.
    pub fn draw_array_var_data(
        &self,
        surface: &mut dyn Surface,
        column: &ColumnDescriptor,
        table: &dyn DatTable,
        rows: &[usize],
        stats: &ColumnStats,
    ) -> Result<()> {
        let stride = stats.entry_stride(table.field_size());
        let max_read = column.text_length.unwrap_or(0).div_ceil(3);
        let _span = debug_span!(
            "draw_array_var_data",
            offset = column.offset,
            stride,
            max_read
        )
        .entered();

        surface.set_fill_style(self.colors.get(SyntaxTag::Hex));
        let variable = table.data_variable();
        let mut text = String::new();
        for (line, &row) in rows.iter().enumerate() {
            let y = self.metrics.line_y(line);
            let base = row_base(table, row, column);
            let length = table.read_u32_le(base)? as usize;
            if length == 0 {
                surface.fill_text("[]", 0.0, y);
                continue;
            }

            let var_offset = table.read_u32_le(base.saturating_add(table.memsize()))? as usize;
            let count = stride.saturating_mul(length).min(max_read);
            text.clear();
            let _ = write!(text, "{length} {{ ");
            write_hex(
                clamped(variable, var_offset, var_offset.saturating_add(count)),
                &mut text,
            );
            text.push_str(" }");
            surface.fill_text(&text, 0.0, y);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dat::{ColumnType, FieldSize, MemoryTable, RefArrayStats};
    use crate::error::Error;
    use crate::render::{ColorTable, RecordingSurface, SurfaceOp};

    fn hex(bytes: &[u8]) -> String {
        let mut text = String::new();
        write_hex(bytes, &mut text);
        text
    }

    /// 16-byte rows: `[len u32][pad u32][offset u32][pad u32]`
    fn array_table(rows: &[(u32, u32)], variable: Vec<u8>) -> MemoryTable {
        let mut fixed = Vec::new();
        for (len, offset) in rows {
            fixed.extend_from_slice(&len.to_le_bytes());
            fixed.extend_from_slice(&[0; 4]);
            fixed.extend_from_slice(&offset.to_le_bytes());
            fixed.extend_from_slice(&[0; 4]);
        }
        MemoryTable::new(16, 8)
            .with_fixed(fixed)
            .with_variable(variable)
    }

    #[test]
    fn f_write_hex() {
        assert_eq!(hex(&[]), "");
        assert_eq!(hex(&[0x0a]), "0a");
        assert_eq!(hex(&[0xde, 0xad, 0xbe, 0xef]), "de ad be ef");
    }

    #[test]
    fn f_clamped() {
        let bytes = [1, 2, 3, 4];
        assert_eq!(clamped(&bytes, 1, 3), &[2, 3]);
        assert_eq!(clamped(&bytes, 2, 10), &[3, 4]);
        assert!(clamped(&bytes, 6, 10).is_empty());
        assert!(clamped(&bytes, 3, 1).is_empty());
    }

    #[test]
    fn f_byte_view_slices_each_row() {
        let table = MemoryTable::new(4, 8).with_fixed(vec![
            0x00, 0x01, 0x02, 0x03, //
            0x10, 0x11, 0x12, 0x13,
        ]);
        let column = ColumnDescriptor::new(1, ColumnType::integer(false, 2));
        let mut surface = RecordingSurface::new();
        ContentRenderer::default().draw_byte_view(&mut surface, &column, &table, &[1, 0], 1, 3);

        assert_eq!(surface.ops()[0], SurfaceOp::FillStyle(ColorTable::STANDARD.hex));
        assert_eq!(
            surface.ops()[1..],
            [
                SurfaceOp::FillText {
                    text: "12 13".into(),
                    x: 21.0,
                    y: 0.0
                },
                SurfaceOp::FillText {
                    text: "02 03".into(),
                    x: 21.0,
                    y: 20.0
                },
            ]
        );
    }

    #[test]
    fn f_byte_view_past_end_is_truncated() {
        let table = MemoryTable::new(4, 8).with_fixed(vec![0xaa, 0xbb, 0xcc, 0xdd]);
        let column = ColumnDescriptor::new(2, ColumnType::boolean());
        let mut surface = RecordingSurface::new();
        ContentRenderer::default().draw_byte_view(&mut surface, &column, &table, &[0, 7], 0, 4);
        assert_eq!(surface.texts(), ["cc dd", ""]);
    }

    #[test]
    fn f_array_empty() {
        let table = array_table(&[(0, 0)], vec![]);
        let column = ColumnDescriptor::new(0, ColumnType::integer(false, 4).into_array())
            .with_text_length(30);
        let mut surface = RecordingSurface::new();
        ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0], &ColumnStats::default())
            .unwrap();
        assert_eq!(surface.texts(), ["[]"]);
    }

    #[test]
    fn f_array_dump_uses_stride() {
        let variable: Vec<u8> = (0..32).collect();
        let table = array_table(&[(2, 4)], variable);
        let column = ColumnDescriptor::new(0, ColumnType::integer(false, 4).into_array())
            .with_text_length(300);
        let stats = ColumnStats::with_ref_array(RefArrayStats {
            numeric32: true,
            ..RefArrayStats::default()
        });
        let mut surface = RecordingSurface::new();
        ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0], &stats)
            .unwrap();
        assert_eq!(surface.texts(), ["2 { 04 05 06 07 08 09 0a 0b }"]);
    }

    #[test]
    fn f_array_dump_capped_by_text_length() {
        let variable: Vec<u8> = (0..64).collect();
        let table = array_table(&[(100, 0)], variable);
        let column = ColumnDescriptor::new(0, ColumnType::key_foreign().into_array())
            .with_text_length(10);
        let stats = ColumnStats::with_ref_array(RefArrayStats {
            key_foreign: true,
            ..RefArrayStats::default()
        });
        let mut surface = RecordingSurface::new();
        ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0], &stats)
            .unwrap();
        assert_eq!(surface.texts(), ["100 { 00 01 02 03 }"]);
    }

    #[test]
    fn f_array_dump_without_text_length() {
        let table = array_table(&[(3, 0)], vec![1, 2, 3]);
        let column = ColumnDescriptor::new(0, ColumnType::boolean().into_array());
        let mut surface = RecordingSurface::new();
        ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0], &ColumnStats::default())
            .unwrap();
        assert_eq!(surface.texts(), ["3 {  }"]);
    }

    #[test]
    fn f_array_dump_offset_past_variable_region() {
        let table = array_table(&[(2, 1000)], vec![1, 2, 3]);
        let column = ColumnDescriptor::new(0, ColumnType::boolean().into_array())
            .with_text_length(30);
        let mut surface = RecordingSurface::new();
        ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0], &ColumnStats::default())
            .unwrap();
        assert_eq!(surface.texts(), ["2 {  }"]);
    }

    #[test]
    fn f_array_dump_memsize_locates_offset() {
        let mut fixed = Vec::new();
        fixed.extend_from_slice(&1_u32.to_le_bytes());
        fixed.extend_from_slice(&2_u32.to_le_bytes());
        let table = MemoryTable::new(8, 4)
            .with_fixed(fixed)
            .with_variable(vec![9, 8, 7, 6])
            .with_field_size(FieldSize::for_memsize(4));
        let column = ColumnDescriptor::new(0, ColumnType::boolean().into_array())
            .with_text_length(30);
        let mut surface = RecordingSurface::new();
        ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0], &ColumnStats::default())
            .unwrap();
        assert_eq!(surface.texts(), ["1 { 07 }"]);
    }

    #[test]
    fn f_array_dump_row_past_fixed_region() {
        let table = array_table(&[(0, 0)], vec![]);
        let column = ColumnDescriptor::new(0, ColumnType::boolean().into_array());
        let mut surface = RecordingSurface::new();
        let err = ContentRenderer::default()
            .draw_array_var_data(&mut surface, &column, &table, &[0, 1], &ColumnStats::default())
            .unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { offset: 16, len: 16 }));
        assert_eq!(surface.texts(), ["[]"]);
    }
}
