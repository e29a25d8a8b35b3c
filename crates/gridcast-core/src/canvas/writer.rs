use std::collections::BTreeMap;

use crate::canvas::{CanvasSink, CellRef, CellStyle, MergeRange};
use crate::config::schema::WidthPolicy;
use crate::layout::grid::Grid;
use crate::model::Table;

#[derive(Debug, Clone, Copy, Default)]
struct ColumnStats {
    longest_text: usize,
    extent: f64,
}

/// Writes grids and table rows into a sink with one uniform cell style and
/// remembers what each column received so widths can be sized at the end.
pub struct CanvasWriter<'a> {
    sink: &'a mut dyn CanvasSink,
    style: CellStyle,
    columns: BTreeMap<u32, ColumnStats>,
}

impl<'a> CanvasWriter<'a> {
    pub fn new(sink: &'a mut dyn CanvasSink) -> Self {
        Self {
            sink,
            style: CellStyle::table(),
            columns: BTreeMap::new(),
        }
    }

    pub fn write_cell(&mut self, cell: CellRef, value: &str) {
        self.sink.write_cell(cell, value, &self.style);
        let stats = self.columns.entry(cell.col).or_default();
        stats.longest_text = stats.longest_text.max(value.chars().count());
    }

    pub fn merge(&mut self, range: MergeRange) {
        self.sink.merge(range);
    }

    /// Note a horizontal extent (pt) for `col`; the widest one is kept.
    pub fn record_extent(&mut self, col: u32, points: f64) {
        let stats = self.columns.entry(col).or_default();
        stats.extent = stats.extent.max(points);
    }

    /// Write a reconstructed grid so that its cell (1, 1) lands on `origin`.
    ///
    /// Every cell of the grid rectangle is written (empty text where the grid
    /// has none) so the whole region carries the table style. Returns the
    /// bottom-right cell written, or `None` for an empty grid.
    pub fn write_grid(&mut self, grid: &Grid, origin: CellRef) -> Option<CellRef> {
        if grid.row_count() == 0 || grid.column_count() == 0 {
            return None;
        }
        let dr = origin.row.saturating_sub(1);
        let dc = origin.col.saturating_sub(1);

        for row in 1..=grid.row_count() {
            for col in 1..=grid.column_count() {
                let value = grid.cell(row, col).unwrap_or_default();
                self.write_cell(CellRef::new(row + dr, col + dc), value);
            }
        }

        for span in grid.merges() {
            self.merge(MergeRange {
                start: CellRef::new(span.row + dr, span.col_start + dc),
                end: CellRef::new(span.row + dr, span.col_end + dc),
            });
        }

        for (i, extent) in grid.column_extents().iter().enumerate() {
            self.record_extent(i as u32 + 1 + dc, *extent);
        }

        Some(CellRef::new(
            grid.row_count() + dr,
            grid.column_count() + dc,
        ))
    }

    /// Write already padded rows starting at `start`, one canvas row per row.
    ///
    /// `column_extent` is the source width (pt) of one column, if known.
    /// Returns the bottom-right cell written, or `None` when there is nothing
    /// to write.
    pub fn write_rows(
        &mut self,
        rows: &[Vec<String>],
        start: CellRef,
        column_extent: Option<f64>,
    ) -> Option<CellRef> {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        if rows.is_empty() || width == 0 {
            return None;
        }

        for (r, row) in rows.iter().enumerate() {
            for c in 0..width {
                let value = row.get(c as usize).map(String::as_str).unwrap_or_default();
                self.write_cell(CellRef::new(start.row + r as u32, start.col + c), value);
            }
        }

        if let Some(extent) = column_extent {
            for c in 0..width {
                self.record_extent(start.col + c, extent);
            }
        }

        Some(CellRef::new(
            start.row + rows.len() as u32 - 1,
            start.col + width - 1,
        ))
    }

    /// Write a pre-segmented table at `start`, padding ragged rows.
    ///
    /// When the table has a usable bbox its width is shared evenly between
    /// its columns for slot-extent sizing.
    pub fn write_table(&mut self, table: &Table, start: CellRef) -> Option<CellRef> {
        let columns = table.column_count();
        let column_extent = table
            .bbox
            .filter(|b| !b.is_degenerate() && columns > 0)
            .map(|b| b.width() / columns as f64);
        self.write_rows(&table.padded_rows(), start, column_extent)
    }

    /// Size every column that received content and release the sink.
    ///
    /// Returns the number of columns sized.
    pub fn finish(self, policy: &WidthPolicy) -> usize {
        let Self { sink, columns, .. } = self;
        for (&col, stats) in &columns {
            sink.set_column_width(col, column_width(policy, stats));
        }
        columns.len()
    }
}

fn column_width(policy: &WidthPolicy, stats: &ColumnStats) -> f64 {
    match *policy {
        WidthPolicy::SlotExtent {
            pixels_per_char,
            min_width,
        } => slot_width(stats.extent, pixels_per_char, min_width),
        WidthPolicy::Fixed { width } => width,
        WidthPolicy::Autofit { min_width, factor } => {
            (stats.longest_text as f64 * factor).max(min_width)
        }
    }
}

/// Width units for a slot of `extent` points, treating one point as one pixel.
pub fn slot_width(extent: f64, pixels_per_char: f64, min_width: f64) -> f64 {
    (extent / pixels_per_char).max(min_width)
}
