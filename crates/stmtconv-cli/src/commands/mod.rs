pub mod convert;
pub mod parse;

use crate::ConfigArgs;
use stmtconv_core::config::{load_config, ConvertConfig, MissingStatementDatePolicy};
use stmtconv_core::error::ConvertError;

/// Merge the config file (if any) with command-line overrides.
pub fn build_config(args: &ConfigArgs) -> Result<ConvertConfig, ConvertError> {
    let mut config = match &args.config_file {
        Some(path) => load_config(path)?,
        None => ConvertConfig::default(),
    };

    if let Some(ref bank_name) = args.bank_name {
        config.bank_name = bank_name.clone();
    }
    if let Some(ref date_format) = args.date_format {
        config.date_format = date_format.clone();
    }
    if args.strict {
        config.missing_statement_date = MissingStatementDatePolicy::Strict;
    } else if let Some(date) = args.statement_date {
        config.missing_statement_date = MissingStatementDatePolicy::Fixed(date);
    }

    config.validate()?;
    Ok(config)
}
