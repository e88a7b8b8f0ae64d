pub mod memo;
pub mod normalize;
pub mod values;

use crate::error::ConvertError;
use crate::extraction::table::RawTable;
use crate::model::{OutputRecord, TransactionGroup};
use chrono::NaiveDate;
use memo::compose_memo;
use normalize::{flatten_tables, group_transactions, trim_rows};
use tracing::{debug, warn};
use values::{resolve_date, sign_amount};

/// Turn per-page tables into transaction groups.
///
/// Zero transactions is a valid statement; it is logged, not an error.
pub fn parse_transactions(tables: Vec<RawTable>) -> Result<Vec<TransactionGroup>, ConvertError> {
    let rows = flatten_tables(tables)?;
    let total = rows.len();
    let rows = trim_rows(rows);
    debug!(rows = total, kept = rows.len(), "trimmed statement rows");

    if rows.is_empty() {
        warn!("no transactions found in statement");
        return Ok(Vec::new());
    }

    Ok(group_transactions(rows))
}

/// Convert one transaction group into its output record.
pub fn format_record(
    group: &TransactionGroup,
    statement_date: NaiveDate,
    date_format: &str,
) -> Result<OutputRecord, ConvertError> {
    let memo = compose_memo(group)?;
    let payee = group.payee_lines.first().cloned().unwrap_or_default();

    Ok(OutputRecord {
        post_date: resolve_date(&group.post_date, statement_date, date_format)?,
        trans_date: resolve_date(&group.trans_date, statement_date, date_format)?,
        payee,
        hkd_amount: sign_amount(&group.hkd_amount),
        memo,
    })
}

pub fn format_records(
    groups: &[TransactionGroup],
    statement_date: NaiveDate,
    date_format: &str,
) -> Result<Vec<OutputRecord>, ConvertError> {
    groups
        .iter()
        .map(|g| format_record(g, statement_date, date_format))
        .collect()
}
