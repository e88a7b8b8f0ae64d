use crate::extraction::{cluster_lines, PageRegion, Word};

/// Reconstruct a grid of cells from the positioned words of a page region.
///
/// Rows follow text lines. Columns are bounded by explicit vertical lines
/// (ruled column separators known for the layout) plus text gutters: bands
/// of the region no word overlaps. A gutter whose gap already contains an
/// explicit line, give or take `intersection_x_tolerance`, adds no edge,
/// since text is not always flush with the ruled line.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSettings {
    pub explicit_vertical_lines: Vec<f32>,
    pub intersection_x_tolerance: f32,
    /// Narrower gaps between words are treated as word spacing, not gutters.
    pub min_gutter_width: f32,
}

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            explicit_vertical_lines: Vec::new(),
            intersection_x_tolerance: 3.0,
            min_gutter_width: 6.0,
        }
    }
}

/// Cells extracted from one page. Every row has the same number of cells;
/// a cell with no text is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub page_number: usize,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn column_count(&self) -> Option<usize> {
        self.rows.first().map(|r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn extract_table(region: &PageRegion<'_>, settings: &TableSettings) -> RawTable {
    let words: Vec<&Word> = region.words().collect();
    if words.is_empty() {
        return RawTable {
            page_number: region.page_number(),
            rows: Vec::new(),
        };
    }

    let bounds = region.bbox();
    let edges = column_edges(bounds.x_min, bounds.x_max, &words, settings);
    let columns = edges.len() - 1;

    let rows = cluster_lines(words.into_iter())
        .into_iter()
        .map(|line| {
            let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns];
            for word in line {
                cells[column_index(&edges, word.bbox.center_x())].push(&word.text);
            }
            cells
                .into_iter()
                .map(|parts| {
                    if parts.is_empty() {
                        None
                    } else {
                        Some(parts.join(" "))
                    }
                })
                .collect()
        })
        .collect();

    RawTable {
        page_number: region.page_number(),
        rows,
    }
}

/// Column edges from left bound to right bound, inclusive.
fn column_edges(left: f32, right: f32, words: &[&Word], settings: &TableSettings) -> Vec<f32> {
    let tol = settings.intersection_x_tolerance;

    let mut explicit: Vec<f32> = settings
        .explicit_vertical_lines
        .iter()
        .copied()
        .filter(|x| *x > left && *x < right)
        .collect();
    explicit.sort_by(f32::total_cmp);
    explicit.dedup();

    let mut edges = explicit.clone();
    for (gap_start, gap_end) in text_gutters(words, settings.min_gutter_width) {
        let separated = explicit
            .iter()
            .any(|x| *x >= gap_start - tol && *x <= gap_end + tol);
        if !separated {
            edges.push((gap_start + gap_end) / 2.0);
        }
    }
    edges.sort_by(f32::total_cmp);

    let mut all = Vec::with_capacity(edges.len() + 2);
    all.push(left);
    all.extend(edges);
    all.push(right);
    all
}

/// Gaps of at least `min_width` in the union of the words' horizontal extents.
fn text_gutters(words: &[&Word], min_width: f32) -> Vec<(f32, f32)> {
    let mut spans: Vec<(f32, f32)> = words
        .iter()
        .map(|w| (w.bbox.x_min, w.bbox.x_max))
        .collect();
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f32, f32)> = Vec::new();
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start - last.1 < min_width => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged.windows(2).map(|pair| (pair[0].1, pair[1].0)).collect()
}

fn column_index(edges: &[f32], x: f32) -> usize {
    edges[1..edges.len() - 1]
        .iter()
        .filter(|edge| x >= **edge)
        .count()
}
