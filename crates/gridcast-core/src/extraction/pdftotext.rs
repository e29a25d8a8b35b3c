use crate::error::GridError;
use crate::extraction::PageExtractor;
use crate::model::{PageTokens, Token};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::Write;
use std::process::Command;

/// Word extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox`, which emits one `<word>` element per word with its
/// bounding box in page points (origin top-left).
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageTokens>, GridError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| GridError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| GridError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GridError::PdftotextNotFound
                } else {
                    GridError::Extraction(format!("pdftotext -bbox failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(GridError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml)?;
        tracing::debug!(
            pages = pages.len(),
            words = pages.iter().map(|p| p.tokens.len()).sum::<usize>(),
            "pdftotext extraction done"
        );
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

struct OpenWord {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    text: String,
}

/// Parse the XHTML written by `pdftotext -bbox` into word tokens per page.
fn parse_bbox_xml(xml: &str) -> Result<Vec<PageTokens>, GridError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<PageTokens> = Vec::new();
    let mut word: Option<OpenWord> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| GridError::Extraction(format!("bad pdftotext XML: {e}")))?;
        match event {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"page" => {
                pages.push(PageTokens {
                    page_number: pages.len() + 1,
                    width: attr_f64(&e, b"width").unwrap_or_default(),
                    height: attr_f64(&e, b"height").unwrap_or_default(),
                    tokens: Vec::new(),
                });
            }
            Event::Start(e) if e.name().as_ref() == b"word" => {
                word = match (
                    attr_f64(&e, b"xMin"),
                    attr_f64(&e, b"xMax"),
                    attr_f64(&e, b"yMin"),
                    attr_f64(&e, b"yMax"),
                ) {
                    (Some(left), Some(right), Some(top), Some(bottom)) => Some(OpenWord {
                        left,
                        right,
                        top,
                        bottom,
                        text: String::new(),
                    }),
                    _ => {
                        tracing::debug!("word without full bbox, skipped");
                        None
                    }
                };
            }
            Event::Text(t) => {
                if let Some(open) = word.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| GridError::Extraction(format!("bad word text: {e}")))?;
                    open.text.push_str(&text);
                }
            }
            Event::End(e) if e.name().as_ref() == b"word" => {
                if let (Some(open), Some(page)) = (word.take(), pages.last_mut()) {
                    page.tokens.push(Token::new(
                        open.text, open.left, open.right, open.top, open.bottom,
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn attr_f64(tag: &BytesStart<'_>, name: &[u8]) -> Option<f64> {
    tag.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok()?.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
"http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="Skia/PDF"/>
</head>
<body>
<doc>
  <page width="595.000000" height="842.000000">
    <word xMin="36.000000" yMin="40.100000" xMax="70.500000" yMax="50.000000">Name</word>
    <word xMin="75.000000" yMin="40.300000" xMax="110.000000" yMax="50.000000">J&amp;K</word>
  </page>
  <page width="595.000000" height="842.000000">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_xml_words() {
        let pages = parse_bbox_xml(SAMPLE).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].width, 595.0);
        assert_eq!(pages[0].tokens.len(), 2);

        let name = &pages[0].tokens[0];
        assert_eq!(name.text, "Name");
        assert_eq!(name.left, 36.0);
        assert_eq!(name.right, 70.5);
        assert_eq!(name.top, 40.1);
        assert_eq!(pages[0].tokens[1].text, "J&K");

        assert_eq!(pages[1].page_number, 2);
        assert!(pages[1].tokens.is_empty());
    }

    #[test]
    fn test_word_without_bbox_is_skipped() {
        let xml = r#"<doc><page width="100" height="100">
            <word xMin="1" yMin="2" xMax="3">partial</word>
            <word xMin="1" yMin="2" xMax="3" yMax="4">ok</word>
        </page></doc>"#;
        let pages = parse_bbox_xml(xml).unwrap();
        assert_eq!(pages[0].tokens.len(), 1);
        assert_eq!(pages[0].tokens[0].text, "ok");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let err = parse_bbox_xml("<doc><page></doc>").unwrap_err();
        assert!(matches!(err, GridError::Extraction(_)));
    }
}
