use stmtconv_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::ConfigArgs;

pub fn run(
    input_file: PathBuf,
    config_args: &ConfigArgs,
    out: Option<PathBuf>,
) -> Result<(), stmtconv_core::error::ConvertError> {
    let config = super::build_config(config_args)?;
    let extractor = PdftotextExtractor::new();
    let path = stmtconv_core::convert_file(&input_file, out.as_deref(), &extractor, &config)?;
    eprintln!("Converted {} -> {}", input_file.display(), path.display());
    Ok(())
}
