use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::layout::columns::ColumnBoundaries;
use crate::layout::rows::RowCluster;

/// Horizontal merge of `col_start..=col_end` within one grid row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MergeSpan {
    pub row: u32,
    pub col_start: u32,
    pub col_end: u32,
}

impl MergeSpan {
    pub fn contains(&self, col: u32) -> bool {
        self.col_start <= col && col <= self.col_end
    }
}

/// Reconstructed table: sparse text cells plus horizontal merges.
///
/// Rows and columns are 1-based so the grid can be written to a canvas as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    cells: BTreeMap<(u32, u32), String>,
    merges: Vec<MergeSpan>,
    row_count: u32,
    column_extents: Vec<f64>,
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> u32 {
        self.column_extents.len() as u32
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&str> {
        self.cells.get(&(row, col)).map(String::as_str)
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &str)> {
        self.cells
            .iter()
            .map(|(&(row, col), text)| (row, col, text.as_str()))
    }

    pub fn merges(&self) -> &[MergeSpan] {
        &self.merges
    }

    /// Width in points of each inferred column slot, by column index - 1.
    pub fn column_extents(&self) -> &[f64] {
        &self.column_extents
    }

    /// Dense row-major copy with empty strings for unoccupied cells.
    pub fn rows(&self) -> Vec<Vec<String>> {
        (1..=self.row_count)
            .map(|row| {
                (1..=self.column_count())
                    .map(|col| self.cell(row, col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }
}

#[derive(Serialize)]
struct GridCell<'a> {
    row: u32,
    col: u32,
    text: &'a str,
}

#[derive(Serialize)]
struct GridRepr<'a> {
    row_count: u32,
    column_count: u32,
    cells: Vec<GridCell<'a>>,
    merges: &'a [MergeSpan],
    column_extents: &'a [f64],
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GridRepr {
            row_count: self.row_count,
            column_count: self.column_count(),
            cells: self
                .cells()
                .map(|(row, col, text)| GridCell { row, col, text })
                .collect(),
            merges: &self.merges,
            column_extents: &self.column_extents,
        }
        .serialize(serializer)
    }
}

/// Map row clusters onto column slots.
///
/// Each cluster becomes one grid row (1-based, in cluster order). Tokens are
/// visited left to right; a token that fits one slot is appended to that cell,
/// a token crossing several slots is written to its first slot and recorded as
/// a merge. A token starting inside an earlier merge of the same row is folded
/// into that merge's anchor cell (widening the merge if needed), so merges in
/// a row never overlap.
pub fn assemble(clusters: &[RowCluster], columns: &ColumnBoundaries) -> Grid {
    let mut grid = Grid {
        row_count: clusters.len() as u32,
        column_extents: columns.extents(),
        ..Grid::default()
    };

    for (idx, cluster) in clusters.iter().enumerate() {
        let row = idx as u32 + 1;
        let mut tokens: Vec<_> = cluster.tokens.iter().filter(|t| !t.is_degenerate()).collect();
        tokens.sort_by(|a, b| a.left.total_cmp(&b.left));

        let first_merge = grid.merges.len();
        for token in tokens {
            let (start, end) = columns.span_of(token.left, token.right);
            let mut col = start as u32 + 1;
            let end_col = end as u32 + 1;

            // Spans open in non-decreasing column order, so only the latest
            // merge of this row can contain the current start column.
            let inside_open_merge = grid.merges[first_merge..]
                .last()
                .is_some_and(|span| span.contains(col));
            if inside_open_merge {
                if let Some(span) = grid.merges.last_mut() {
                    col = span.col_start;
                    span.col_end = span.col_end.max(end_col);
                }
            } else if end_col > col {
                grid.merges.push(MergeSpan {
                    row,
                    col_start: col,
                    col_end: end_col,
                });
            }

            let text = token.text.trim();
            grid.cells
                .entry((row, col))
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(text);
                })
                .or_insert_with(|| text.to_string());
        }
    }

    tracing::debug!(
        rows = grid.row_count,
        columns = grid.column_count(),
        cells = grid.cells.len(),
        merges = grid.merges.len(),
        "assembled grid"
    );
    grid
}
