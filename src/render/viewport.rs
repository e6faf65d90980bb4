//! Visible row window
//!
//! The painter draws whatever rows it is handed. [`Viewport`] decides which
//! rows those are for a scrolled table and where the block sits vertically.

use std::ops::Range;

use super::surface::Metrics;

/// Window of rows starting at a scroll offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    offset: usize,
    total_rows: usize,
    visible_rows: usize,
}

impl Viewport {
    /// Window of `visible_rows` lines at the top of a `total_rows` table
    #[must_use]
    pub fn new(total_rows: usize, visible_rows: usize) -> Self {
        Self {
            offset: 0,
            total_rows,
            visible_rows,
        }
    }

    /// First visible row
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scroll to `offset`, clamped so the last window stays full
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.total_rows.saturating_sub(self.visible_rows));
    }

    /// Table rows in the window, never past the last row
    pub fn visible_range(&self) -> Range<usize> {
        let end = self
            .offset
            .saturating_add(self.visible_rows)
            .min(self.total_rows);
        self.offset.min(end)..end
    }

    /// Row indices for one paint pass, top to bottom
    pub fn row_indices(&self) -> Vec<usize> {
        self.visible_range().collect()
    }

    /// Vertical translation that places the painted block at its table
    /// position inside a full-height scroll area
    #[must_use]
    pub fn y_offset(&self, metrics: &Metrics) -> f64 {
        metrics.line_y(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f_new_starts_at_top() {
        let viewport = Viewport::new(100, 20);
        assert_eq!(viewport.offset(), 0);
        assert_eq!(viewport.visible_range(), 0..20);
    }

    #[test]
    fn f_offset_keeps_last_window_full() {
        let mut viewport = Viewport::new(25, 10);
        viewport.set_offset(500);
        assert_eq!(viewport.offset(), 15);
        assert_eq!(viewport.row_indices(), (15..25).collect::<Vec<_>>());
    }

    #[test]
    fn f_short_table() {
        let mut viewport = Viewport::new(3, 10);
        viewport.set_offset(2);
        assert_eq!(viewport.offset(), 0);
        assert_eq!(viewport.row_indices(), [0, 1, 2]);
        assert!(Viewport::new(0, 10).row_indices().is_empty());
    }

    #[test]
    fn f_empty_window() {
        let mut viewport = Viewport::new(10, 0);
        viewport.set_offset(4);
        assert_eq!(viewport.offset(), 4);
        assert!(viewport.row_indices().is_empty());
    }

    #[test]
    fn f_y_offset() {
        let mut viewport = Viewport::new(100, 10);
        viewport.set_offset(7);
        assert_eq!(viewport.y_offset(&Metrics::default()), 140.0);
    }
}
