use crate::error::ConvertError;
use crate::extraction::{BBox, PageContent, PdfExtractor, Word};
use std::io::Write;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -bbox` to get every word with its bounding box, in points
/// with the origin at the top-left corner of the page.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ConvertError> {
        // Write PDF bytes to a temp file; it is removed when dropped.
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ConvertError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ConvertError::Extraction(e.to_string()))?;

        let output = Command::new("pdftotext")
            .arg("-bbox")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConvertError::PdftotextNotFound
                } else {
                    ConvertError::Extraction(format!("pdftotext -bbox failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ConvertError::PdftotextFailed { code, stderr });
        }

        let xml = String::from_utf8_lossy(&output.stdout);
        let pages = parse_bbox_xml(&xml);
        tracing::debug!(pages = pages.len(), "pdftotext extracted pages");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Parse the XHTML document written by `pdftotext -bbox`.
///
/// pdftotext writes one `<page>` or `<word>` tag per line, so a line scan is
/// enough; no general XML parser is needed.
fn parse_bbox_xml(xml: &str) -> Vec<PageContent> {
    let mut pages: Vec<PageContent> = Vec::new();

    for raw in xml.lines() {
        let line = raw.trim();

        if line.starts_with("<page ") {
            pages.push(PageContent {
                page_number: pages.len() + 1,
                width: parse_attr_f32(line, "width").unwrap_or(0.0),
                height: parse_attr_f32(line, "height").unwrap_or(0.0),
                words: Vec::new(),
            });
            continue;
        }

        if line.starts_with("<word ") {
            let Some(page) = pages.last_mut() else {
                continue;
            };
            if let (Some(bbox), Some(text)) = (parse_bbox(line), parse_word_text(line)) {
                let text = decode_xml_entities(&text).trim().to_string();
                if !text.is_empty() {
                    page.words.push(Word { text, bbox });
                }
            }
        }
    }

    pages
}

fn parse_attr_f32(tag: &str, name: &str) -> Option<f32> {
    parse_attr(tag, name)?.parse().ok()
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_bbox(word_tag: &str) -> Option<BBox> {
    Some(BBox {
        x_min: parse_attr_f32(word_tag, "xMin")?,
        y_min: parse_attr_f32(word_tag, "yMin")?,
        x_max: parse_attr_f32(word_tag, "xMax")?,
        y_max: parse_attr_f32(word_tag, "yMax")?,
    })
}

fn parse_word_text(word_tag: &str) -> Option<String> {
    let start = word_tag.find('>')? + 1;
    let end = word_tag.rfind("</word>")?;
    Some(word_tag[start..end].to_string())
}

fn decode_xml_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox_xml_pages_and_words() {
        let xml = r#"
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<body>
<doc>
  <page width="595.276000" height="841.890000">
    <word xMin="56.800000" yMin="100.000000" xMax="98.100000" yMax="109.000000">Statement</word>
    <word xMin="101.000000" yMin="100.000000" xMax="118.000000" yMax="109.000000">date</word>
  </page>
  <page width="595.276000" height="841.890000">
    <word xMin="20.000000" yMin="50.000000" xMax="60.000000" yMax="59.000000">M&amp;S</word>
  </page>
</doc>
</body>
</html>
"#;
        let pages = parse_bbox_xml(xml);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].width, 595.276);
        assert_eq!(pages[0].words.len(), 2);
        assert_eq!(pages[0].words[0].text, "Statement");
        assert_eq!(pages[0].words[0].bbox.x_min, 56.8);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].words[0].text, "M&S");
    }

    #[test]
    fn test_word_before_page_is_ignored() {
        let xml = r#"<word xMin="1" yMin="1" xMax="2" yMax="2">stray</word>"#;
        assert!(parse_bbox_xml(xml).is_empty());
    }

    #[test]
    fn test_decode_does_not_double_unescape() {
        assert_eq!(decode_xml_entities("&amp;lt;"), "&lt;");
    }
}
