pub mod pdftotext;
pub mod table;

use crate::error::ConvertError;
use table::{RawTable, TableSettings};

/// Words whose tops differ by at most this many points share a text line.
pub const TEXT_Y_TOLERANCE: f32 = 3.0;

/// Axis-aligned box in page coordinates (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        BBox {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    pub fn center_x(&self) -> f32 {
        (self.x_min + self.x_max) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.y_min + self.y_max) / 2.0
    }

    /// True when `other` lies entirely inside this box.
    pub fn contains(&self, other: &BBox) -> bool {
        other.x_min >= self.x_min
            && other.x_max <= self.x_max
            && other.y_min >= self.y_min
            && other.y_max <= self.y_max
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

/// A single positioned word on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub bbox: BBox,
}

impl Word {
    pub fn new(text: impl Into<String>, bbox: BBox) -> Self {
        Word {
            text: text.into(),
            bbox,
        }
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    pub width: f32,
    pub height: f32,
    pub words: Vec<Word>,
}

impl PageContent {
    pub fn bounds(&self) -> BBox {
        BBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Find every occurrence of `needle` on the page, in reading order.
    ///
    /// Matching runs over consecutive words of one text line joined by single
    /// spaces, so multi-word labels such as "Statement date" are found even
    /// though the backend reports them as separate words.
    pub fn search(&self, needle: &str) -> Vec<BBox> {
        let needle = normalize_ws(needle);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for line in cluster_lines(self.words.iter()) {
            let mut start = 0;
            while start < line.len() {
                let mut joined = String::new();
                let mut end = start;
                let mut found = false;
                while end < line.len() {
                    if !joined.is_empty() {
                        joined.push(' ');
                    }
                    joined.push_str(&line[end].text);
                    if joined.len() >= needle.len() {
                        found = joined.contains(&needle);
                        break;
                    }
                    end += 1;
                }

                if found {
                    // Drop leading words the match does not need.
                    while start < end && join_words(&line[start + 1..=end]).contains(&needle) {
                        start += 1;
                    }
                    let bbox = line[start + 1..=end]
                        .iter()
                        .fold(line[start].bbox, |acc, w| acc.union(&w.bbox));
                    hits.push(bbox);
                    start = end + 1;
                } else {
                    start += 1;
                }
            }
        }
        hits
    }

    /// Text of the words lying entirely inside `bbox`, one output line per
    /// text line.
    pub fn text_within(&self, bbox: &BBox) -> String {
        cluster_lines(self.words.iter().filter(|w| bbox.contains(&w.bbox)))
            .iter()
            .map(|line| {
                line.iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Restrict the page to a rectangular region.
    pub fn crop(&self, bbox: BBox) -> PageRegion<'_> {
        PageRegion { page: self, bbox }
    }
}

/// A rectangular slice of a page. Words belong to the region when their
/// centre falls inside it.
#[derive(Debug, Clone, Copy)]
pub struct PageRegion<'a> {
    page: &'a PageContent,
    bbox: BBox,
}

impl<'a> PageRegion<'a> {
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn page_number(&self) -> usize {
        self.page.page_number
    }

    pub fn words(&self) -> impl Iterator<Item = &'a Word> + '_ {
        self.page
            .words
            .iter()
            .filter(|w| self.bbox.contains_point(w.bbox.center_x(), w.bbox.center_y()))
    }

    pub fn extract_table(&self, settings: &TableSettings) -> RawTable {
        table::extract_table(self, settings)
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned words from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ConvertError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Group words into text lines sorted top to bottom, each sorted left to right.
pub(crate) fn cluster_lines<'a>(words: impl Iterator<Item = &'a Word>) -> Vec<Vec<&'a Word>> {
    let mut sorted: Vec<&Word> = words.collect();
    sorted.sort_by(|a, b| {
        a.bbox
            .y_min
            .total_cmp(&b.bbox.y_min)
            .then(a.bbox.x_min.total_cmp(&b.bbox.x_min))
    });

    let mut lines: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        match lines.last_mut() {
            Some(line) if (word.bbox.y_min - line[0].bbox.y_min).abs() <= TEXT_Y_TOLERANCE => {
                line.push(word)
            }
            _ => lines.push(vec![word]),
        }
    }

    for line in &mut lines {
        line.sort_by(|a, b| a.bbox.x_min.total_cmp(&b.bbox.x_min));
    }
    lines
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_words(words: &[&Word]) -> String {
    words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Lay out a line of words at `y`, each starting at the given x with a
    /// width of 5 points per character.
    pub(crate) fn line(y: f32, words: &[(f32, &str)]) -> Vec<Word> {
        words
            .iter()
            .map(|(x, text)| {
                let w = text.chars().count() as f32 * 5.0;
                Word::new(*text, BBox::new(*x, y, x + w, y + 8.0))
            })
            .collect()
    }

    fn page(words: Vec<Word>) -> PageContent {
        PageContent {
            page_number: 1,
            width: 600.0,
            height: 800.0,
            words,
        }
    }

    #[test]
    fn test_search_multi_word_label() {
        let p = page(line(100.0, &[(50.0, "Statement"), (100.0, "date")]));
        let hits = p.search("Statement date");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], BBox::new(50.0, 100.0, 120.0, 108.0));
    }

    #[test]
    fn test_search_box_excludes_preceding_words() {
        let p = page(line(
            100.0,
            &[(200.0, "No."), (300.0, "Statement"), (350.0, "date")],
        ));
        let hits = p.search("Statement date");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], BBox::new(300.0, 100.0, 370.0, 108.0));
    }

    #[test]
    fn test_search_requires_same_line() {
        let mut words = line(100.0, &[(50.0, "Statement")]);
        words.extend(line(140.0, &[(50.0, "date")]));
        assert!(page(words).search("Statement date").is_empty());
    }

    #[test]
    fn test_search_reading_order() {
        let mut words = line(300.0, &[(10.0, "Post"), (40.0, "date")]);
        words.extend(line(90.0, &[(10.0, "Post"), (40.0, "date")]));
        let hits = page(words).search("Post date");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].y_min, 90.0);
        assert_eq!(hits[1].y_min, 300.0);
    }

    #[test]
    fn test_text_within_keeps_only_enclosed_words() {
        let mut words = line(100.0, &[(50.0, "10"), (65.0, "Jan"), (85.0, "2024")]);
        words.extend(line(100.0, &[(400.0, "elsewhere")]));
        let p = page(words);
        let text = p.text_within(&BBox::new(40.0, 95.0, 200.0, 115.0));
        assert_eq!(text, "10 Jan 2024");
    }

    #[test]
    fn test_cluster_lines_tolerates_jitter() {
        let mut words = line(100.0, &[(80.0, "B")]);
        words.extend(line(101.5, &[(10.0, "A")]));
        words.extend(line(120.0, &[(10.0, "C")]));
        let lines = cluster_lines(words.iter());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text, "A");
        assert_eq!(lines[0][1].text, "B");
    }
}
