use serde::{Deserialize, Serialize};

/// Axis-aligned box in page points: `x0`/`x1` horizontal, `top`/`bottom` vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    /// A box with no horizontal extent cannot be compared against the page width.
    pub fn is_degenerate(&self) -> bool {
        !(self.x1 > self.x0)
    }
}

/// A positioned text fragment produced by a word extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            text: text.into(),
            left,
            right,
            top,
            bottom,
        }
    }

    /// Blank text or a non-finite coordinate. Such tokens are skipped by layout.
    pub fn is_degenerate(&self) -> bool {
        self.text.trim().is_empty()
            || !self.left.is_finite()
            || !self.right.is_finite()
            || !self.top.is_finite()
    }
}

/// One page worth of positioned tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTokens {
    pub page_number: usize,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    pub tokens: Vec<Token>,
}

/// A pre-segmented table as handed over by a table finder.
///
/// `bbox` is optional because some segmenters only return rows; such tables
/// are placed full-width. Cells may be `None` (merged or empty in the source).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub bbox: Option<BBox>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(bbox: Option<BBox>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { bbox, rows }
    }

    /// Build a table from plain text rows.
    pub fn from_text_rows<R, S>(bbox: Option<BBox>, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| Some(c.into())).collect())
            .collect();
        Self { bbox, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the longest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rows padded with empty text up to `column_count()`.
    pub fn padded_rows(&self) -> Vec<Vec<String>> {
        let width = self.column_count();
        self.rows
            .iter()
            .map(|row| {
                (0..width)
                    .map(|i| row.get(i).cloned().flatten().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Treat the first row as a header and zip every later row against it.
    ///
    /// Header cells that are blank get a positional name (`column_3`).
    pub fn key_value_rows(&self) -> Vec<Vec<(String, String)>> {
        let rows = self.padded_rows();
        let Some((header, body)) = rows.split_first() else {
            return Vec::new();
        };
        let keys: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = h.trim();
                if h.is_empty() {
                    format!("column_{}", i + 1)
                } else {
                    h.to_string()
                }
            })
            .collect();

        body.iter()
            .map(|row| {
                keys.iter()
                    .cloned()
                    .zip(row.iter().map(|v| v.trim().to_string()))
                    .collect()
            })
            .collect()
    }
}

/// One page worth of pre-segmented tables, in reading order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTables {
    pub page_number: usize,
    pub width: f64,
    pub tables: Vec<Table>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn degenerate_bbox() {
        assert!(BBox::new(10.0, 0.0, 10.0, 5.0).is_degenerate());
        assert!(BBox::new(10.0, 0.0, 4.0, 5.0).is_degenerate());
        assert!(BBox::new(f64::NAN, 0.0, 4.0, 5.0).is_degenerate());
        assert!(!BBox::new(0.0, 0.0, 4.0, 5.0).is_degenerate());
    }

    #[test]
    fn bbox_width_never_negative() {
        assert_eq!(BBox::new(100.0, 0.0, 340.0, 5.0).width(), 240.0);
        assert_eq!(BBox::new(100.0, 0.0, 40.0, 5.0).width(), 0.0);
    }

    #[test]
    fn blank_token_is_degenerate() {
        assert!(Token::new("  ", 0.0, 10.0, 0.0, 5.0).is_degenerate());
        assert!(Token::new("x", f64::INFINITY, 10.0, 0.0, 5.0).is_degenerate());
        assert!(!Token::new("x", 0.0, 10.0, 0.0, 5.0).is_degenerate());
    }

    #[test]
    fn ragged_rows_are_padded() {
        let table = Table::new(
            None,
            vec![
                vec![Some("a".into()), Some("b".into()), Some("c".into())],
                vec![Some("d".into())],
                vec![None, Some("e".into())],
            ],
        );
        assert_eq!(table.column_count(), 3);
        assert_eq!(
            table.padded_rows(),
            vec![
                vec!["a", "b", "c"],
                vec!["d", "", ""],
                vec!["", "e", ""],
            ]
        );
    }

    #[test]
    fn key_value_rows_use_header() {
        let table = Table::from_text_rows(
            None,
            vec![vec!["Date", "Day", ""], vec!["01", "Mon", "8.0"]],
        );
        assert_eq!(
            table.key_value_rows(),
            vec![vec![
                ("Date".to_string(), "01".to_string()),
                ("Day".to_string(), "Mon".to_string()),
                ("column_3".to_string(), "8.0".to_string()),
            ]]
        );
    }

    #[test]
    fn key_value_rows_empty_table() {
        assert!(Table::default().key_value_rows().is_empty());
    }
}
