//! Layout reconstruction: positioned words to a grid of cells.
//!
//! 1. `rows` groups tokens into visual lines by their `top` coordinate.
//! 2. `columns` derives one shared set of column boundaries from every
//!    token edge on the page.
//! 3. `grid` places each token of each row into the slot(s) it covers.

pub mod columns;
pub mod grid;
pub mod rows;

use crate::config::schema::LayoutConfig;
use crate::model::{PageTokens, Token};
use grid::Grid;

/// Run the three reconstruction stages over one page.
///
/// A page without usable tokens gives `Grid::empty()`.
pub fn reconstruct_page(page: &PageTokens, config: &LayoutConfig) -> Grid {
    let usable: Vec<Token> = page
        .tokens
        .iter()
        .filter(|t| !t.is_degenerate())
        .cloned()
        .collect();
    let skipped = page.tokens.len() - usable.len();
    if skipped > 0 {
        tracing::debug!(page = page.page_number, skipped, "skipped degenerate tokens");
    }

    let Some(columns) = columns::infer_columns(&usable, config.column_gap) else {
        tracing::info!(page = page.page_number, "page has no usable tokens");
        return Grid::empty();
    };

    let clusters = rows::cluster(&usable, config.row_tolerance, config.row_clustering);
    tracing::debug!(
        page = page.page_number,
        rows = clusters.len(),
        strategy = %config.row_clustering,
        "clustered rows"
    );

    grid::assemble(&clusters, &columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RowClustering;

    fn page(tokens: Vec<Token>) -> PageTokens {
        PageTokens {
            page_number: 1,
            width: 595.0,
            height: 842.0,
            tokens,
        }
    }

    #[test]
    fn test_empty_page_gives_empty_grid() {
        let grid = reconstruct_page(&page(vec![]), &LayoutConfig::default());
        assert!(grid.is_empty());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.column_count(), 0);
    }

    #[test]
    fn test_only_blank_tokens_gives_empty_grid() {
        let grid = reconstruct_page(
            &page(vec![Token::new("", 0.0, 10.0, 0.0, 5.0)]),
            &LayoutConfig::default(),
        );
        assert!(grid.is_empty());
    }

    #[test]
    fn test_two_line_payslip_header() {
        let tokens = vec![
            Token::new("Name", 0.0, 40.0, 10.0, 18.0),
            Token::new("John", 45.0, 80.0, 11.0, 19.0),
            Token::new("Position", 0.0, 40.0, 30.0, 38.0),
            Token::new("Driver", 45.0, 80.0, 29.5, 37.5),
        ];
        let grid = reconstruct_page(&page(tokens), &LayoutConfig::default());
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(1, 2), Some("John"));
        assert_eq!(grid.cell(2, 1), Some("Position"));
        assert_eq!(grid.cell(2, 2), Some("Driver"));
    }

    #[test]
    fn test_gap_cut_strategy_selected_by_config() {
        let tokens = vec![
            Token::new("a", 0.0, 10.0, 10.0, 18.0),
            Token::new("b", 0.0, 10.0, 12.5, 20.5),
            Token::new("c", 0.0, 10.0, 15.0, 23.0),
        ];
        let mut config = LayoutConfig::default();
        config.row_clustering = RowClustering::GapCut;
        assert_eq!(reconstruct_page(&page(tokens.clone()), &config).row_count(), 1);

        config.row_tolerance = 2.0;
        assert_eq!(reconstruct_page(&page(tokens), &config).row_count(), 3);
    }
}
