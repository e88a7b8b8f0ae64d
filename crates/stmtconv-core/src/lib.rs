pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod output;
pub mod parsing;
pub mod scan;

use chrono::NaiveDate;
use config::{ConvertConfig, MissingStatementDatePolicy};
use error::ConvertError;
use extraction::{PageContent, PdfExtractor};
use model::{Statement, StatementDateSource};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Main API entry point: convert PDF statement bytes into output records.
pub fn convert_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ConvertConfig,
) -> Result<Statement, ConvertError> {
    config.validate()?;

    let pages = extractor.extract_pages(pdf_bytes)?;
    info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted statement pages"
    );

    convert_pages(&pages, config)
}

/// Run the conversion on already-extracted pages.
pub fn convert_pages(
    pages: &[PageContent],
    config: &ConvertConfig,
) -> Result<Statement, ConvertError> {
    config.validate()?;
    let scanned = scan::scan_pages(pages)?;
    let (statement_date, statement_date_source) =
        resolve_statement_date(scanned.statement_date, config.missing_statement_date)?;

    let groups = parsing::parse_transactions(scanned.tables)?;
    let records = parsing::format_records(&groups, statement_date, &config.date_format)?;
    info!(
        %statement_date,
        transactions = records.len(),
        "converted statement"
    );

    Ok(Statement {
        statement_date,
        statement_date_source,
        page_count: pages.len(),
        records,
    })
}

/// Convert the PDF at `input` and write the CSV, by default next to the
/// input. Returns the path written.
///
/// Nothing is written unless the whole conversion succeeds.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    extractor: &dyn PdfExtractor,
    config: &ConvertConfig,
) -> Result<PathBuf, ConvertError> {
    let pdf_bytes = std::fs::read(input)?;
    let statement = convert_pdf(&pdf_bytes, extractor, config)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => output::output_path(input, &config.bank_name),
    };
    output::write_csv(&statement.records, &path)?;
    info!(path = %path.display(), "wrote converted statement");
    Ok(path)
}

fn resolve_statement_date(
    found: Option<NaiveDate>,
    policy: MissingStatementDatePolicy,
) -> Result<(NaiveDate, StatementDateSource), ConvertError> {
    if let Some(date) = found {
        return Ok((date, StatementDateSource::Extracted));
    }

    let fallback = match policy {
        MissingStatementDatePolicy::Strict => return Err(ConvertError::MissingStatementDate),
        MissingStatementDatePolicy::Today => chrono::Local::now().date_naive(),
        MissingStatementDatePolicy::Fixed(date) => date,
    };
    warn!(
        %fallback,
        "no statement date found; transaction years may be wrong across a year boundary"
    );
    Ok((fallback, StatementDateSource::Fallback))
}
