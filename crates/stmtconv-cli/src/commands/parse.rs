use stmtconv_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;
use crate::ConfigArgs;

pub fn run(
    pdf_file: PathBuf,
    config_args: &ConfigArgs,
    output_format: &str,
) -> Result<(), stmtconv_core::error::ConvertError> {
    let config = super::build_config(config_args)?;
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let statement = stmtconv_core::convert_pdf(&pdf_bytes, &extractor, &config)?;

    match output_format {
        "json" => output::json::print(&statement)?,
        "csv" => stmtconv_core::output::write_records(&statement.records, std::io::stdout().lock())?,
        _ => print!("{}", output::table::format_statement(&statement)),
    }

    Ok(())
}
