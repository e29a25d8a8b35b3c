use serde::Serialize;
use std::fmt;

use crate::config::schema::ZoneConfig;

/// Where a placed table lives on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    FullWidth,
    /// 0-based side zone index, left to right.
    Side(usize),
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::FullWidth => write!(f, "full-width"),
            ZoneId::Side(i) => write!(f, "zone {}", i + 1),
        }
    }
}

impl ZoneId {
    /// Human name for this zone in a layout of `count` side zones.
    pub fn label(self, count: usize) -> String {
        match (self, count) {
            (ZoneId::Side(0), 2 | 3) => "left".into(),
            (ZoneId::Side(1), 2) => "right".into(),
            (ZoneId::Side(1), 3) => "center".into(),
            (ZoneId::Side(2), 3) => "right".into(),
            (id, _) => id.to_string(),
        }
    }
}

/// A vertical strip of the canvas with its own next-free-row cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub start_column: u32,
    /// First column of the next zone to the right, if any.
    pub end_column: Option<u32>,
    cursor_row: u32,
}

impl Zone {
    fn new(id: ZoneId, start_column: u32, end_column: Option<u32>) -> Self {
        Self {
            id,
            start_column,
            end_column,
            cursor_row: 1,
        }
    }

    pub fn cursor_row(&self) -> u32 {
        self.cursor_row
    }

    /// Number of canvas columns available before the next zone starts.
    pub fn capacity(&self) -> Option<u32> {
        self.end_column.map(|end| end.saturating_sub(self.start_column))
    }
}

/// Row cursors for one page's placement pass.
///
/// Owned by the caller and handed to the allocator for every table of a page.
/// Cursors only ever move down; `reset` is the only way back to row 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneRegistry {
    full_width: Zone,
    sides: Vec<Zone>,
}

impl ZoneRegistry {
    pub fn new(config: &ZoneConfig) -> Self {
        let starts: Vec<u32> = (0..config.count).map(|i| config.start_column(i)).collect();
        let sides = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| Zone::new(ZoneId::Side(i), start, starts.get(i + 1).copied()))
            .collect();
        Self {
            full_width: Zone::new(ZoneId::FullWidth, config.start_column(0), None),
            sides,
        }
    }

    pub fn reset(&mut self) {
        self.full_width.cursor_row = 1;
        for zone in &mut self.sides {
            zone.cursor_row = 1;
        }
    }

    pub fn zone_count(&self) -> usize {
        self.sides.len()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        match id {
            ZoneId::FullWidth => Some(&self.full_width),
            ZoneId::Side(i) => self.sides.get(i),
        }
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        std::iter::once(&self.full_width).chain(self.sides.iter())
    }

    pub fn cursor(&self, id: ZoneId) -> Option<u32> {
        self.zone(id).map(Zone::cursor_row)
    }

    /// Lowest row below all current content, full-width included.
    pub fn max_cursor(&self) -> u32 {
        self.zones().map(Zone::cursor_row).max().unwrap_or(1)
    }

    /// Move one zone's cursor down to `row`. Never moves a cursor up.
    pub(crate) fn advance(&mut self, id: ZoneId, row: u32) {
        let zone = match id {
            ZoneId::FullWidth => Some(&mut self.full_width),
            ZoneId::Side(i) => self.sides.get_mut(i),
        };
        if let Some(zone) = zone {
            zone.cursor_row = zone.cursor_row.max(row);
        }
    }

    /// Move every cursor, full-width included, down to at least `row`.
    pub(crate) fn advance_all(&mut self, row: u32) {
        self.full_width.cursor_row = self.full_width.cursor_row.max(row);
        for zone in &mut self.sides {
            zone.cursor_row = zone.cursor_row.max(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_zones() -> ZoneRegistry {
        ZoneRegistry::new(&ZoneConfig::default())
    }

    #[test]
    fn test_new_registry_starts_at_row_one() {
        let reg = three_zones();
        assert_eq!(reg.zone_count(), 3);
        assert!(reg.zones().all(|z| z.cursor_row() == 1));
        assert_eq!(reg.zone(ZoneId::Side(1)).unwrap().start_column, 8);
        assert_eq!(reg.zone(ZoneId::Side(1)).unwrap().capacity(), Some(7));
        assert_eq!(reg.zone(ZoneId::Side(2)).unwrap().capacity(), None);
        assert_eq!(reg.zone(ZoneId::FullWidth).unwrap().start_column, 1);
    }

    #[test]
    fn test_missing_start_columns_use_stride() {
        let config = ZoneConfig {
            count: 4,
            start_columns: vec![1, 8],
            ..ZoneConfig::default()
        };
        let reg = ZoneRegistry::new(&config);
        assert_eq!(reg.zone(ZoneId::Side(2)).unwrap().start_column, 15);
        assert_eq!(reg.zone(ZoneId::Side(3)).unwrap().start_column, 22);
    }

    #[test]
    fn test_cursor_never_moves_up() {
        let mut reg = three_zones();
        reg.advance(ZoneId::Side(0), 6);
        reg.advance(ZoneId::Side(0), 3);
        assert_eq!(reg.cursor(ZoneId::Side(0)), Some(6));
        assert_eq!(reg.max_cursor(), 6);

        reg.advance_all(4);
        assert_eq!(reg.cursor(ZoneId::Side(0)), Some(6));
        assert_eq!(reg.cursor(ZoneId::Side(1)), Some(4));
        assert_eq!(reg.cursor(ZoneId::FullWidth), Some(4));
    }

    #[test]
    fn test_reset() {
        let mut reg = three_zones();
        reg.advance_all(9);
        reg.reset();
        assert_eq!(reg.max_cursor(), 1);
    }

    #[test]
    fn test_labels() {
        let reg = three_zones();
        let labels: Vec<String> = reg.zones().map(|z| z.id.label(3)).collect();
        assert_eq!(labels, vec!["full-width", "left", "center", "right"]);
        assert_eq!(ZoneId::Side(1).label(2), "right");
        assert_eq!(ZoneId::Side(3).label(4), "zone 4");
        assert_eq!(reg.cursor(ZoneId::Side(7)), None);
    }
}
