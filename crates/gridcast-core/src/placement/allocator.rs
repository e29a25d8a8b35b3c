use serde::Serialize;

use crate::canvas::writer::CanvasWriter;
use crate::canvas::{CanvasSink, CellRef};
use crate::config::schema::{LayoutConfig, ZoneMapping};
use crate::model::{PageTables, Table};
use crate::placement::zones::{ZoneId, ZoneRegistry};

/// Where one table ended up. Rows and columns are 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementResult {
    pub zone: ZoneId,
    pub start_row: u32,
    pub start_column: u32,
    pub end_row: u32,
    pub end_column: u32,
}

/// Decides full-width vs. side zone for each table and writes it below the
/// chosen zone's cursor.
///
/// The allocator itself is stateless; all cursor state lives in the
/// [`ZoneRegistry`] the caller passes in.
#[derive(Debug, Clone)]
pub struct ZoneAllocator {
    threshold: f64,
    mapping: ZoneMapping,
    zone_count: usize,
    spacing_rows: u32,
}

impl ZoneAllocator {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            threshold: config.full_width_threshold,
            mapping: config.zones.mapping,
            zone_count: config.zones.count.max(1),
            spacing_rows: config.zones.spacing_rows,
        }
    }

    /// Pick the zone for `table` from its geometry alone.
    pub fn classify(&self, table: &Table, page_width: f64) -> ZoneId {
        if self.mapping == ZoneMapping::Stacked {
            return ZoneId::FullWidth;
        }
        let Some(bbox) = table.bbox else {
            tracing::debug!("table has no bbox, placing full-width");
            return ZoneId::FullWidth;
        };
        if !(page_width > 0.0) {
            tracing::debug!(page_width, "non-positive page width, placing full-width");
            return ZoneId::FullWidth;
        }

        let table_width = if bbox.is_degenerate() {
            tracing::debug!(x0 = bbox.x0, x1 = bbox.x1, "degenerate bbox, using page width");
            page_width
        } else {
            bbox.width()
        };
        let ratio = table_width / page_width;
        if ratio >= self.threshold {
            return ZoneId::FullWidth;
        }

        let proportion = bbox.x0 / page_width.max(1.0);
        ZoneId::Side(self.zone_index(proportion))
    }

    fn zone_index(&self, proportion: f64) -> usize {
        let last = self.zone_count - 1;
        let index = match self.mapping {
            ZoneMapping::Thirds if proportion < 1.0 / 3.0 => 0,
            ZoneMapping::Thirds if proportion < 2.0 / 3.0 => 1,
            ZoneMapping::Thirds => 2,
            _ => (proportion * self.zone_count as f64).floor().max(0.0) as usize,
        };
        index.min(last)
    }

    /// Write `table` into its zone and advance the cursors it affects.
    ///
    /// Returns `None`, leaving every cursor untouched, for a table with no
    /// cells. A full-width table starts below all current content and pulls
    /// every cursor down past itself; a side table only moves its own zone.
    pub fn place(
        &self,
        table: &Table,
        page_width: f64,
        registry: &mut ZoneRegistry,
        writer: &mut CanvasWriter<'_>,
    ) -> Option<PlacementResult> {
        let columns = table.column_count() as u32;
        if table.is_empty() || columns == 0 {
            tracing::debug!("empty table, nothing placed");
            return None;
        }

        let mut zone = self.classify(table, page_width);
        if let ZoneId::Side(index) = zone {
            let capacity = registry.zone(zone).and_then(|z| z.capacity());
            if capacity.is_some_and(|cap| columns > cap) {
                tracing::warn!(
                    zone = index + 1,
                    columns,
                    capacity = capacity.unwrap_or_default(),
                    "table wider than its zone, placing full-width"
                );
                zone = ZoneId::FullWidth;
            }
        }

        let start_row = match zone {
            ZoneId::FullWidth => registry.max_cursor(),
            ZoneId::Side(_) => registry.cursor(zone)?,
        };
        let start_column = registry.zone(zone)?.start_column;

        let end = writer.write_table(table, CellRef::new(start_row, start_column))?;
        let next_row = end.row + self.spacing_rows + 1;
        match zone {
            ZoneId::FullWidth => registry.advance_all(next_row),
            ZoneId::Side(_) => registry.advance(zone, next_row),
        }

        tracing::info!(
            zone = %zone,
            start_row,
            start_column,
            end_row = end.row,
            "placed table"
        );
        Some(PlacementResult {
            zone,
            start_row,
            start_column,
            end_row: end.row,
            end_column: end.col,
        })
    }
}

/// Place every table of one page onto `sink` using a fresh zone registry,
/// then size the used columns with the configured width policy.
pub fn place_page(
    page: &PageTables,
    config: &LayoutConfig,
    sink: &mut dyn CanvasSink,
) -> Vec<PlacementResult> {
    let allocator = ZoneAllocator::new(config);
    let mut registry = ZoneRegistry::new(&config.zones);
    let mut writer = CanvasWriter::new(sink);

    let placements: Vec<PlacementResult> = page
        .tables
        .iter()
        .filter_map(|table| allocator.place(table, page.width, &mut registry, &mut writer))
        .collect();

    let sized = writer.finish(&config.canvas.width_policy);
    tracing::debug!(
        page = page.page_number,
        tables = page.tables.len(),
        placed = placements.len(),
        columns_sized = sized,
        "page placement done"
    );
    placements
}
