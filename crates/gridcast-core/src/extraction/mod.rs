pub mod pdftotext;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use crate::error::GridError;
use crate::model::{PageTables, PageTokens};

/// Trait for word-level PDF extraction backends.
pub trait PageExtractor: Send + Sync {
    /// Extract positioned words from PDF bytes, one `PageTokens` per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTokens>, GridError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Load a JSON token stream: one page object or an array of them.
pub fn load_token_pages(path: &Path) -> Result<Vec<PageTokens>, GridError> {
    load_pages(path)
}

/// Load a JSON table stream: one page object or an array of them.
pub fn load_table_pages(path: &Path) -> Result<Vec<PageTables>, GridError> {
    load_pages(path)
}

fn load_pages<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, GridError> {
    let content = std::fs::read_to_string(path).map_err(|e| GridError::InputLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let pages: OneOrMany<T> = serde_json::from_str(&content).map_err(|e| GridError::InputLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let pages = pages.into_vec();
    tracing::debug!(path = %path.display(), pages = pages.len(), "loaded input pages");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn json_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_single_token_page() {
        let file = json_file(
            r#"{"page_number": 1, "width": 595.0, "tokens": [
                {"text": "Name", "left": 0, "right": 40, "top": 10}
            ]}"#,
        );
        let pages = load_token_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].tokens[0].text, "Name");
        assert_eq!(pages[0].tokens[0].bottom, 0.0);
        assert_eq!(pages[0].height, 0.0);
    }

    #[test]
    fn test_load_table_page_array() {
        let file = json_file(
            r#"[
                {"page_number": 1, "width": 612, "tables": [
                    {"bbox": {"x0": 10, "top": 5, "x1": 300, "bottom": 80},
                     "rows": [["Basic", "5000"], ["HRA", null]]}
                ]},
                {"page_number": 2, "width": 612, "tables": [{"rows": []}]}
            ]"#,
        );
        let pages = load_table_pages(file.path()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].tables[0].rows[1][1], None);
        assert!(pages[1].tables[0].bbox.is_none());
    }

    #[test]
    fn test_load_errors_carry_path() {
        let file = json_file("{ not json");
        let err = load_token_pages(file.path()).unwrap_err();
        assert!(matches!(err, GridError::InputLoad { .. }));

        let missing = Path::new("/nonexistent/tokens.json");
        match load_table_pages(missing) {
            Err(GridError::InputLoad { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected InputLoad, got {other:?}"),
        }
    }
}
