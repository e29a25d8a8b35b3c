use crate::model::Token;
use serde::Serialize;

/// Right edges are probed this far inside the token so an edge that lands
/// exactly on a boundary stays in the slot it closes.
const EDGE_EPSILON: f64 = 1e-6;

/// Strictly increasing x positions; `N + 1` boundaries define `N` slots
/// `[b[i], b[i + 1])`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBoundaries(Vec<f64>);

impl ColumnBoundaries {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn slot_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Slot containing `x`. Positions left of the first boundary fall into
    /// slot 0, positions at or past the last boundary into the last slot.
    pub fn slot_of(&self, x: f64) -> usize {
        let at_or_below = self.0.partition_point(|b| *b <= x);
        at_or_below
            .saturating_sub(1)
            .min(self.slot_count().saturating_sub(1))
    }

    /// First and last slot touched by the horizontal extent `left..right`.
    ///
    /// An inverted extent (`right < left`) is clamped to the start slot.
    pub fn span_of(&self, left: f64, right: f64) -> (usize, usize) {
        let start = self.slot_of(left);
        let end = self.slot_of(right - EDGE_EPSILON);
        if end < start {
            tracing::debug!(left, right, "inverted token extent, clamping to start slot");
            (start, start)
        } else {
            (start, end)
        }
    }

    /// Horizontal extent of each slot in points.
    pub fn extents(&self) -> Vec<f64> {
        self.0.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

/// Derive shared column boundaries from every token edge on a page.
///
/// Edges closer than `min_gap` to the last kept boundary are folded into it.
/// A closing boundary is placed `min_gap` past the rightmost edge. Returns
/// `None` when there are no usable tokens (empty page).
pub fn infer_columns(tokens: &[Token], min_gap: f64) -> Option<ColumnBoundaries> {
    let mut edges: Vec<f64> = tokens
        .iter()
        .filter(|t| !t.is_degenerate())
        .flat_map(|t| [t.left, t.right])
        .collect();
    if edges.is_empty() {
        return None;
    }

    edges.sort_by(|a, b| a.total_cmp(b));
    edges.dedup();

    let mut kept = vec![edges[0]];
    for &edge in &edges[1..] {
        if let Some(&last) = kept.last() {
            if edge - last > min_gap {
                kept.push(edge);
            }
        }
    }

    let max_edge = edges[edges.len() - 1];
    kept.push(max_edge + min_gap);

    tracing::debug!(
        edges = edges.len(),
        slots = kept.len() - 1,
        "inferred column boundaries"
    );
    Some(ColumnBoundaries(kept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tok(text: &str, left: f64, right: f64) -> Token {
        Token::new(text, left, right, 10.0, 18.0)
    }

    #[test]
    fn test_empty_page_has_no_boundaries() {
        assert_eq!(infer_columns(&[], 10.0), None);
        assert_eq!(infer_columns(&[tok(" ", 0.0, 10.0)], 10.0), None);
    }

    #[test]
    fn test_close_edges_are_compressed() {
        let tokens = vec![tok("Name", 0.0, 40.0), tok("John", 45.0, 80.0)];
        let cols = infer_columns(&tokens, 10.0).unwrap();
        assert_eq!(cols.as_slice(), &[0.0, 40.0, 80.0, 90.0]);
        assert_eq!(cols.slot_count(), 3);
    }

    #[test]
    fn test_small_gap_keeps_every_edge() {
        let tokens = vec![tok("Name", 0.0, 40.0), tok("John", 45.0, 80.0)];
        let cols = infer_columns(&tokens, 3.0).unwrap();
        assert_eq!(cols.as_slice(), &[0.0, 40.0, 45.0, 80.0, 83.0]);
    }

    #[test]
    fn test_boundaries_strictly_increasing_and_cover_right_edges() {
        let tokens: Vec<Token> = (0..30)
            .map(|i| {
                let left = (i * 37 % 200) as f64 + 0.3 * i as f64;
                tok("w", left, left + 5.0 + (i % 4) as f64 * 11.0)
            })
            .collect();
        let cols = infer_columns(&tokens, 4.0).unwrap();
        let b = cols.as_slice();
        assert!(b.windows(2).all(|w| w[1] > w[0]));
        let max_right = tokens.iter().map(|t| t.right).fold(f64::MIN, f64::max);
        assert!(*b.last().unwrap() > max_right);
    }

    #[test]
    fn test_slot_of_clamps_out_of_range() {
        let cols = infer_columns(&[tok("a", 10.0, 50.0)], 5.0).unwrap();
        assert_eq!(cols.as_slice(), &[10.0, 50.0, 55.0]);
        assert_eq!(cols.slot_of(0.0), 0);
        assert_eq!(cols.slot_of(10.0), 0);
        assert_eq!(cols.slot_of(50.0), 1);
        assert_eq!(cols.slot_of(1000.0), 1);
    }

    #[test]
    fn test_right_edge_on_boundary_stays_in_slot() {
        let tokens = vec![tok("a", 0.0, 40.0), tok("b", 40.0, 80.0)];
        let cols = infer_columns(&tokens, 5.0).unwrap();
        assert_eq!(cols.span_of(0.0, 40.0), (0, 0));
        assert_eq!(cols.span_of(40.0, 80.0), (1, 1));
        assert_eq!(cols.span_of(0.0, 80.0), (0, 1));
    }

    #[test]
    fn test_inverted_extent_clamps() {
        let tokens = vec![tok("a", 0.0, 40.0), tok("b", 50.0, 80.0)];
        let cols = infer_columns(&tokens, 5.0).unwrap();
        assert_eq!(cols.span_of(60.0, 10.0), (2, 2));
    }

    #[test]
    fn test_extents() {
        let tokens = vec![tok("Name", 0.0, 40.0), tok("John", 45.0, 80.0)];
        let cols = infer_columns(&tokens, 10.0).unwrap();
        assert_eq!(cols.extents(), vec![40.0, 40.0, 10.0]);
    }
}
