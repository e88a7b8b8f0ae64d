use crate::error::ConvertError;
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

/// Format of the date printed under the "Statement date" label.
pub const STATEMENT_DATE_FORMAT: &str = "%d %b %Y";

/// Suffix marking an inflow (credit) in the HKD amount column.
const CREDIT_SUFFIX: &str = "CR";

/// Parse the statement date text, e.g. "10 Jan 2024".
pub fn parse_statement_date(s: &str) -> Result<NaiveDate, ConvertError> {
    let s = s.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&s, STATEMENT_DATE_FORMAT).map_err(|e| ConvertError::DateParse {
        input: s.clone(),
        reason: e.to_string(),
    })
}

/// Resolve a day+month transaction date such as "15Dec" against the
/// statement date and render it with `output_format`.
///
/// The year is the statement's year, except that December entries on a
/// January statement belong to the previous year. Blank input stays blank.
pub fn resolve_date(
    s: &str,
    statement_date: NaiveDate,
    output_format: &str,
) -> Result<String, ConvertError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(String::new());
    }

    // Parse against a leap year so that 29Feb is accepted here and only
    // rejected if the resolved year has no such day.
    let parsed = NaiveDate::parse_from_str(&format!("{}2000", compact), "%d%b%Y").map_err(|e| {
        ConvertError::DateParse {
            input: s.to_string(),
            reason: e.to_string(),
        }
    })?;

    let year = if parsed.month() == 12 && statement_date.month() == 1 {
        statement_date.year() - 1
    } else {
        statement_date.year()
    };

    let resolved = parsed.with_year(year).ok_or_else(|| ConvertError::DateParse {
        input: s.to_string(),
        reason: format!("no such day in {}", year),
    })?;

    let mut rendered = String::new();
    write!(rendered, "{}", resolved.format(output_format)).map_err(|_| {
        ConvertError::Config(format!("date_format '{}' is not a valid pattern", output_format))
    })?;
    Ok(rendered)
}

/// Turn the statement's amount notation into a signed amount.
///
/// "1,234.56CR" (credit) becomes "1,234.56"; anything else is a debit and
/// gets a leading '-'.
pub fn sign_amount(s: &str) -> String {
    let s = s.trim();
    match s.strip_suffix(CREDIT_SUFFIX) {
        Some(inflow) => inflow.trim_end().to_string(),
        None => format!("-{}", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_statement_date() {
        assert_eq!(parse_statement_date("10 Jan 2024").unwrap(), date(2024, 1, 10));
        assert_eq!(parse_statement_date(" 10  JAN\n2024 ").unwrap(), date(2024, 1, 10));
    }

    #[test]
    fn test_parse_statement_date_rejects_garbage() {
        assert!(matches!(
            parse_statement_date("Statement"),
            Err(ConvertError::DateParse { .. })
        ));
    }

    #[test]
    fn test_december_on_january_statement_is_previous_year() {
        let stmt = date(2024, 1, 10);
        assert_eq!(resolve_date("15Dec", stmt, "%Y-%m-%d").unwrap(), "2023-12-15");
    }

    #[test]
    fn test_january_on_january_statement_is_same_year() {
        let stmt = date(2024, 1, 10);
        assert_eq!(resolve_date("05Jan", stmt, "%Y-%m-%d").unwrap(), "2024-01-05");
    }

    #[test]
    fn test_december_on_december_statement_is_same_year() {
        let stmt = date(2023, 12, 20);
        assert_eq!(resolve_date("15DEC", stmt, "%d/%m/%Y").unwrap(), "15/12/2023");
    }

    #[test]
    fn test_inner_whitespace_tolerated() {
        let stmt = date(2024, 3, 10);
        assert_eq!(resolve_date("02 MAR", stmt, "%d/%m/%Y").unwrap(), "02/03/2024");
    }

    #[test]
    fn test_leap_day_needs_leap_year() {
        assert_eq!(
            resolve_date("29Feb", date(2024, 3, 1), "%Y-%m-%d").unwrap(),
            "2024-02-29"
        );
        assert!(resolve_date("29Feb", date(2023, 3, 1), "%Y-%m-%d").is_err());
    }

    #[test]
    fn test_blank_date_stays_blank() {
        assert_eq!(resolve_date("", date(2024, 1, 1), "%Y").unwrap(), "");
    }

    #[test]
    fn test_invalid_output_format_is_config_error() {
        assert!(matches!(
            resolve_date("05Jan", date(2024, 1, 10), "%Q"),
            Err(ConvertError::Config(_))
        ));
    }

    #[test]
    fn test_bad_date_is_error() {
        assert!(resolve_date("32Jan", date(2024, 1, 1), "%Y").is_err());
        assert!(resolve_date("PAYMENT", date(2024, 1, 1), "%Y").is_err());
    }

    #[test]
    fn test_credit_is_inflow() {
        assert_eq!(sign_amount("1,234.56CR"), "1,234.56");
        assert_eq!(sign_amount("50.00 CR"), "50.00");
    }

    #[test]
    fn test_debit_is_outflow() {
        assert_eq!(sign_amount("1,234.56"), "-1,234.56");
    }

    #[test]
    fn test_blank_amount_is_outflow() {
        assert_eq!(sign_amount("  "), "-");
    }
}
