pub mod writer;

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 1-based (row, column) address on the output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letter(self.col), self.row)
    }
}

/// Spreadsheet column name for a 1-based index (1 -> A, 27 -> AA).
pub fn column_letter(col: u32) -> String {
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl fmt::Display for MergeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    #[default]
    None,
    Thin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Bottom,
    Center,
    Top,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    pub border: Border,
    pub wrap_text: bool,
    pub vertical: VerticalAlign,
}

impl CellStyle {
    /// Thin border on all sides, wrapped text, top aligned.
    pub fn table() -> Self {
        Self {
            border: Border::Thin,
            wrap_text: true,
            vertical: VerticalAlign::Top,
        }
    }
}

/// Destination for finished cells, merges and column widths.
///
/// Implementations do not deduplicate: writing one cell twice is a caller bug.
pub trait CanvasSink {
    fn write_cell(&mut self, cell: CellRef, value: &str, style: &CellStyle);

    fn merge(&mut self, range: MergeRange);

    fn set_column_width(&mut self, col: u32, width: f64);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasCell {
    pub value: String,
    pub style: CellStyle,
}

/// In-memory sink; the last write to a cell wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCanvas {
    cells: BTreeMap<CellRef, CanvasCell>,
    merges: Vec<MergeRange>,
    column_widths: BTreeMap<u32, f64>,
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: u32, col: u32) -> Option<&CanvasCell> {
        self.cells.get(&CellRef::new(row, col))
    }

    pub fn value(&self, row: u32, col: u32) -> Option<&str> {
        self.get(row, col).map(|c| c.value.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellRef, &CanvasCell)> {
        self.cells.iter()
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn max_row(&self) -> u32 {
        self.cells.keys().map(|c| c.row).max().unwrap_or(0)
    }

    pub fn max_column(&self) -> u32 {
        self.cells.keys().map(|c| c.col).max().unwrap_or(0)
    }

    /// Dense `max_row x max_column` view, empty strings for unwritten cells.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        (1..=self.max_row())
            .map(|row| {
                (1..=self.max_column())
                    .map(|col| self.value(row, col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }
}

impl CanvasSink for MemoryCanvas {
    fn write_cell(&mut self, cell: CellRef, value: &str, style: &CellStyle) {
        self.cells.insert(
            cell,
            CanvasCell {
                value: value.to_string(),
                style: *style,
            },
        );
    }

    fn merge(&mut self, range: MergeRange) {
        self.merges.push(range);
    }

    fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }
}

#[derive(Serialize)]
struct CanvasEntry<'a> {
    #[serde(flatten)]
    cell: &'a CellRef,
    #[serde(flatten)]
    content: &'a CanvasCell,
}

#[derive(Serialize)]
struct CanvasRepr<'a> {
    max_row: u32,
    max_column: u32,
    cells: Vec<CanvasEntry<'a>>,
    merges: &'a [MergeRange],
    column_widths: &'a BTreeMap<u32, f64>,
}

impl Serialize for MemoryCanvas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CanvasRepr {
            max_row: self.max_row(),
            max_column: self.max_column(),
            cells: self
                .cells
                .iter()
                .map(|(cell, content)| CanvasEntry { cell, content })
                .collect(),
            merges: &self.merges,
            column_widths: &self.column_widths,
        }
        .serialize(serializer)
    }
}
