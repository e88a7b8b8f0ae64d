use crate::error::ConvertError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

pub const DEFAULT_BANK_NAME: &str = "hsbc_hk_cc";
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// What to do when no "Statement date" label is found in the document.
///
/// Transaction dates carry no year, so any fallback date risks mis-dating
/// transactions of statements that span a year boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingStatementDatePolicy {
    /// Warn and use the current local date.
    #[default]
    Today,
    /// Fail the conversion.
    Strict,
    /// Warn and use the given date.
    Fixed(NaiveDate),
}

/// Conversion settings, as supplied by the caller or a JSON config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Used in the output file name.
    pub bank_name: String,
    /// chrono strftime pattern for the output dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub missing_statement_date: MissingStatementDatePolicy,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            bank_name: DEFAULT_BANK_NAME.to_string(),
            date_format: default_date_format(),
            missing_statement_date: MissingStatementDatePolicy::default(),
        }
    }
}

impl ConvertConfig {
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.bank_name.trim().is_empty() {
            return Err(ConvertError::Config("bank_name must not be empty".into()));
        }
        if self
            .bank_name
            .chars()
            .any(|c| std::path::is_separator(c) || c.is_control())
        {
            return Err(ConvertError::Config(format!(
                "bank_name '{}' cannot be used in a file name",
                self.bank_name
            )));
        }
        validate_date_format(&self.date_format)
    }
}

/// Reject patterns chrono cannot render, before any work is done.
fn validate_date_format(pattern: &str) -> Result<(), ConvertError> {
    if pattern.is_empty() {
        return Err(ConvertError::Config("date_format must not be empty".into()));
    }
    let probe = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let mut rendered = String::new();
    write!(rendered, "{}", probe.format(pattern)).map_err(|_| {
        ConvertError::Config(format!("date_format '{}' is not a valid pattern", pattern))
    })?;
    Ok(())
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ConvertConfig, ConvertError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConvertError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ConvertConfig =
        serde_json::from_str(&content).map_err(|e| ConvertError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}
