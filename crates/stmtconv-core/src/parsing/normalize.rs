use crate::error::ConvertError;
use crate::extraction::table::RawTable;
use crate::model::{StatementRow, TransactionGroup, STATEMENT_COLUMNS};

/// Whitespace-free text of the disclaimer that follows the last transaction.
pub const FOOTER_MARKER: &str = "*Forcreditcardtransactionseffectedincurrencies";

/// Flatten per-page tables into statement rows.
///
/// Drops each page's header row and rows with no text at all. A page whose
/// table does not have exactly one cell per statement column aborts the
/// conversion, since later stages rely on fixed positions.
pub fn flatten_tables(tables: Vec<RawTable>) -> Result<Vec<StatementRow>, ConvertError> {
    let mut rows = Vec::new();

    for table in tables {
        let page = table.page_number;
        for cells in table.rows.into_iter().skip(1) {
            let row = StatementRow::from_cells(cells).map_err(|actual| ConvertError::TableSize {
                page,
                actual,
                expected: STATEMENT_COLUMNS.len(),
            })?;
            if !row.is_blank() {
                rows.push(row);
            }
        }
    }

    Ok(rows)
}

/// Keep only the rows between the first dated row and the footer disclaimer.
///
/// Leading undated rows carry the previous-balance block.
pub fn trim_rows(rows: Vec<StatementRow>) -> Vec<StatementRow> {
    rows.into_iter()
        .skip_while(|row| !row.starts_transaction())
        .take_while(|row| !row.compact_text().contains(FOOTER_MARKER))
        .collect()
}

/// Fold rows into transactions: each dated row opens a group, and undated
/// rows contribute their payee cell to the open group.
pub fn group_transactions(rows: Vec<StatementRow>) -> Vec<TransactionGroup> {
    let mut groups = Vec::new();
    let mut current: Option<TransactionGroup> = None;

    for row in rows {
        if row.starts_transaction() {
            if let Some(done) = current.take() {
                groups.push(done);
            }
            current = Some(TransactionGroup::open(row));
        } else {
            match current.as_mut() {
                Some(group) => group.push_continuation(row),
                // Unreachable after trim_rows, which starts on a dated row.
                None => current = Some(TransactionGroup::open(row)),
            }
        }
    }

    if let Some(done) = current {
        groups.push(done);
    }
    groups
}
