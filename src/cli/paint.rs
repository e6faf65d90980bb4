//! `paint` and `columns` commands

use std::io::{stdout, IsTerminal};
use std::path::Path;

use tracing::{debug, info};

use super::{PaintArgs, TerminalSurface};
use crate::config::RenderConfig;
use crate::dat::{DatTable, Fixture};
use crate::error::{Error, Result};
use crate::render::{ContentRenderer, Reference, Viewport};

fn load_config(args: &PaintArgs) -> Result<RenderConfig> {
    let config = match &args.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    Ok(if args.high_contrast {
        config.with_high_contrast(true)
    } else {
        config
    })
}

/// Paint one column for the requested row window.
pub(crate) fn cmd_paint(args: &PaintArgs) -> Result<()> {
    let fixture = Fixture::from_path(&args.fixture)?;
    let table = fixture.table(&args.table)?;
    let column = table.column(&args.column)?;
    let config = load_config(args)?;

    let mut viewport = Viewport::new(table.row_count(), args.height);
    viewport.set_offset(args.offset);
    let rows = viewport.row_indices();
    info!(
        table = %args.table,
        column = %args.column,
        first = viewport.offset(),
        rows = rows.len(),
        "painting"
    );

    let renderer = ContentRenderer::new(&config);
    let mut surface = TerminalSurface::new(config.metrics);
    if args.plain || !stdout().is_terminal() {
        surface = surface.plain();
    }

    if let Some(range) = &args.bytes {
        debug!(?range, "byte view");
        renderer.draw_byte_view(&mut surface, column, table, &rows, range.start, range.end);
    } else if args.raw_array {
        let stats = table.stats(column)?;
        renderer.draw_array_var_data(&mut surface, column, table, &rows, stats)?;
    } else {
        let reference = match &args.reference {
            Some((ref_table, ref_column)) => {
                let ref_table = fixture.table(ref_table)?;
                Some(Reference::new(ref_table.column(ref_column)?, ref_table))
            }
            None => None,
        };
        renderer.render_cell_content(&mut surface, column, table, &rows, reference)?;
    }

    surface
        .flush_to(&mut stdout().lock())
        .map_err(Error::io_no_path)
}

/// List a table's columns with their declared types.
pub(crate) fn cmd_columns(fixture: &Path, table: &str) -> Result<()> {
    let fixture = Fixture::from_path(fixture)?;
    let table = fixture.table(table)?;

    println!(
        "{} rows, {} bytes per row, memsize {}",
        table.row_count(),
        table.row_length(),
        table.memsize()
    );
    for column in table.columns() {
        let descriptor = &column.descriptor;
        let ty = match descriptor.ty.tag() {
            Some(tag) if descriptor.is_array() => format!("[{tag}]"),
            Some(tag) => tag.to_string(),
            None => "unknown".to_string(),
        };
        let width = descriptor
            .text_length
            .map(|n| format!("  width {n}"))
            .unwrap_or_default();
        println!(
            "  {:<24} @{:<5} {}{}",
            descriptor.label(),
            descriptor.offset,
            ty,
            width
        );
    }
    Ok(())
}
