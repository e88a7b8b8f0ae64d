//! Per-page scanning: statement date lookup and transaction table extraction.

use crate::error::ConvertError;
use crate::extraction::table::{RawTable, TableSettings};
use crate::extraction::{BBox, PageContent};
use crate::model::STATEMENT_COLUMNS;
use crate::parsing::values::parse_statement_date;
use chrono::NaiveDate;
use tracing::debug;

pub const STATEMENT_DATE_LABEL: &str = "Statement date";
pub const TABLE_TOP_LABEL: &str = "Post date";
pub const TABLE_BOTTOM_LABEL: &str = "Minimum payment summary";

// The date sits below its label, slightly wider than it.
const STATEMENT_DATE_BOX_LEFT_MARGIN: f32 = 20.0;
const STATEMENT_DATE_BOX_RIGHT_MARGIN: f32 = 40.0;
const STATEMENT_DATE_BOX_HEIGHT: f32 = 20.0;

/// Ruled column separators of the transaction table, in points.
pub const COLUMN_LINES: [f32; 4] = [260.0, 330.0, 350.0, 380.0];
/// Right-hand column text is not always flush with its ruled line.
pub const INTERSECTION_X_TOLERANCE: f32 = 25.0;

pub fn table_settings() -> TableSettings {
    TableSettings {
        explicit_vertical_lines: COLUMN_LINES.to_vec(),
        intersection_x_tolerance: INTERSECTION_X_TOLERANCE,
        ..TableSettings::default()
    }
}

/// Output of scanning every page of a statement.
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    /// Date under the first "Statement date" label, if any page has one.
    pub statement_date: Option<NaiveDate>,
    /// One table per page, in document order.
    pub tables: Vec<RawTable>,
}

pub fn scan_pages(pages: &[PageContent]) -> Result<ScannedDocument, ConvertError> {
    let settings = table_settings();
    let mut statement_date = None;
    let mut tables = Vec::with_capacity(pages.len());

    for page in pages {
        if statement_date.is_none() {
            statement_date = find_statement_date(page)?;
        }

        let region = transaction_region(page);
        let table = page.crop(region).extract_table(&settings);

        if let Some(actual) = table.column_count() {
            if actual != STATEMENT_COLUMNS.len() {
                return Err(ConvertError::TableSize {
                    page: page.page_number,
                    actual,
                    expected: STATEMENT_COLUMNS.len(),
                });
            }
        }

        debug!(
            page = page.page_number,
            top = region.y_min,
            bottom = region.y_max,
            rows = table.rows.len(),
            "extracted transaction table"
        );
        tables.push(table);
    }

    Ok(ScannedDocument {
        statement_date,
        tables,
    })
}

/// Read the date printed under the "Statement date" label on this page.
///
/// A label with nothing readable beneath it counts as not found, so later
/// pages are still searched.
fn find_statement_date(page: &PageContent) -> Result<Option<NaiveDate>, ConvertError> {
    let Some(label) = page.search(STATEMENT_DATE_LABEL).into_iter().next() else {
        return Ok(None);
    };

    let date_box = BBox::new(
        label.x_min - STATEMENT_DATE_BOX_LEFT_MARGIN,
        label.y_max,
        label.x_max + STATEMENT_DATE_BOX_RIGHT_MARGIN,
        label.y_max + STATEMENT_DATE_BOX_HEIGHT,
    );
    let text = page.text_within(&date_box);
    let text = text.trim();
    if text.is_empty() {
        debug!(
            page = page.page_number,
            "statement date label without a date below it"
        );
        return Ok(None);
    }

    let date = parse_statement_date(text)?;
    debug!(page = page.page_number, %date, "found statement date");
    Ok(Some(date))
}

/// Full-width slice from the table header down to the payment summary.
fn transaction_region(page: &PageContent) -> BBox {
    let top = page
        .search(TABLE_TOP_LABEL)
        .first()
        .map(|b| b.y_min)
        .unwrap_or(0.0);
    let bottom = page
        .search(TABLE_BOTTOM_LABEL)
        .first()
        .map(|b| b.y_min)
        .unwrap_or(page.height);
    BBox::new(0.0, top, page.width, bottom)
}
