use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

/// Column order of the statement's transaction table.
pub const STATEMENT_COLUMNS: [&str; 8] = [
    "post_date",
    "trans_date",
    "payee",
    "location",
    "country",
    "original_currency",
    "original_amount",
    "hkd_amount",
];

/// Column order of the converted CSV.
pub const OUTPUT_COLUMNS: [&str; 5] = ["post_date", "trans_date", "payee", "hkd_amount", "memo"];

/// One row of the transaction table, with missing cells as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementRow {
    pub post_date: String,
    pub trans_date: String,
    pub payee: String,
    pub location: String,
    pub country: String,
    pub original_currency: String,
    pub original_amount: String,
    pub hkd_amount: String,
}

impl StatementRow {
    /// Build a row from raw table cells.
    ///
    /// Returns the actual cell count as the error when it is not exactly
    /// `STATEMENT_COLUMNS.len()`.
    pub fn from_cells(cells: Vec<Option<String>>) -> Result<Self, usize> {
        let actual = cells.len();
        let cells: [Option<String>; 8] = cells.try_into().map_err(|_| actual)?;
        let [
            post_date,
            trans_date,
            payee,
            location,
            country,
            original_currency,
            original_amount,
            hkd_amount,
        ] = cells.map(Option::unwrap_or_default);

        Ok(StatementRow {
            post_date,
            trans_date,
            payee,
            location,
            country,
            original_currency,
            original_amount,
            hkd_amount,
        })
    }

    fn cells(&self) -> [&str; 8] {
        [
            self.post_date.as_str(),
            self.trans_date.as_str(),
            self.payee.as_str(),
            self.location.as_str(),
            self.country.as_str(),
            self.original_currency.as_str(),
            self.original_amount.as_str(),
            self.hkd_amount.as_str(),
        ]
    }

    pub fn is_blank(&self) -> bool {
        self.cells().iter().all(|c| c.is_empty())
    }

    /// A dated row opens a new transaction; undated rows are continuations.
    pub fn starts_transaction(&self) -> bool {
        !self.post_date.is_empty() || !self.trans_date.is_empty()
    }

    /// Text of every cell with all whitespace removed.
    pub fn compact_text(&self) -> String {
        self.cells()
            .iter()
            .flat_map(|c| c.chars())
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// One logical transaction: the dated row plus its continuation rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionGroup {
    pub post_date: String,
    pub trans_date: String,
    /// Payee cell of every row in the group, in order.
    pub payee_lines: Vec<String>,
    pub location: String,
    pub country: String,
    pub original_currency: String,
    pub original_amount: String,
    pub hkd_amount: String,
}

impl TransactionGroup {
    pub fn open(row: StatementRow) -> Self {
        TransactionGroup {
            post_date: row.post_date,
            trans_date: row.trans_date,
            payee_lines: vec![row.payee],
            location: row.location,
            country: row.country,
            original_currency: row.original_currency,
            original_amount: row.original_amount,
            hkd_amount: row.hkd_amount,
        }
    }

    pub fn push_continuation(&mut self, row: StatementRow) {
        self.payee_lines.push(row.payee);
    }
}

/// A converted transaction, as written to the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    pub post_date: String,
    pub trans_date: String,
    pub payee: String,
    /// Signed: inflows unsigned, outflows prefixed with '-'.
    pub hkd_amount: String,
    pub memo: String,
}

impl OutputRecord {
    /// Numeric value of `hkd_amount`, ignoring thousands separators.
    pub fn amount(&self) -> Option<Decimal> {
        let cleaned: String = self.hkd_amount.chars().filter(|c| *c != ',').collect();
        Decimal::from_str(cleaned.trim()).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementDateSource {
    /// Read from the statement header.
    Extracted,
    /// Label not found; taken from the missing-date policy.
    Fallback,
}

/// Result of converting one statement.
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub statement_date: NaiveDate,
    pub statement_date_source: StatementDateSource,
    pub page_count: usize,
    pub records: Vec<OutputRecord>,
}
