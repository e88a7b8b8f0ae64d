use crate::error::ConvertError;
use crate::model::TransactionGroup;

pub const IMPORT_MARKER: &str = "[Imported from PDF statement]";

/// Compose the memo for a transaction from its secondary fields.
///
/// Parts, each only when its source fields are present, joined by "; ":
/// the place ("Location: X, C" or "Country: C"), the foreign-currency amount,
/// and the continuation lines as "Details: ...". The import marker is
/// appended after " // ", or stands alone when no part applies.
pub fn compose_memo(group: &TransactionGroup) -> Result<String, ConvertError> {
    let mut parts: Vec<String> = Vec::new();

    if !group.location.is_empty() {
        if group.country.is_empty() {
            parts.push(format!("Location: {}", group.location));
        } else {
            parts.push(format!("Location: {}, {}", group.location, group.country));
        }
    } else if !group.country.is_empty() {
        parts.push(format!("Country: {}", group.country));
    }

    if !group.original_currency.is_empty() {
        if group.original_amount.is_empty() {
            return Err(ConvertError::MalformedMemo {
                currency: group.original_currency.clone(),
            });
        }
        parts.push(format!(
            "Original amount: {} {}",
            group.original_amount, group.original_currency
        ));
    }

    let details: Vec<&str> = group
        .payee_lines
        .iter()
        .skip(1)
        .map(|line| line.trim())
        .collect();
    if !details.is_empty() {
        parts.push(format!("Details: {}", details.join(", ")));
    }

    if parts.is_empty() {
        Ok(IMPORT_MARKER.to_string())
    } else {
        Ok(format!("{} // {}", parts.join("; "), IMPORT_MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(payee_lines: &[&str]) -> TransactionGroup {
        TransactionGroup {
            post_date: "15DEC".into(),
            trans_date: "14DEC".into(),
            payee_lines: payee_lines.iter().map(|s| s.to_string()).collect(),
            location: String::new(),
            country: String::new(),
            original_currency: String::new(),
            original_amount: String::new(),
            hkd_amount: "10.00".into(),
        }
    }

    #[test]
    fn test_bare_memo_is_marker_only() {
        assert_eq!(
            compose_memo(&group(&["ACME STORE"])).unwrap(),
            "[Imported from PDF statement]"
        );
    }

    #[test]
    fn test_country_and_details() {
        let mut g = group(&["ACME STORE", "ref 123"]);
        g.country = "US".into();
        assert_eq!(
            compose_memo(&g).unwrap(),
            "Country: US; Details: ref 123 // [Imported from PDF statement]"
        );
    }

    #[test]
    fn test_location_with_country() {
        let mut g = group(&["ACME STORE"]);
        g.location = "SAN FRANCISCO".into();
        g.country = "US".into();
        assert_eq!(
            compose_memo(&g).unwrap(),
            "Location: SAN FRANCISCO, US // [Imported from PDF statement]"
        );
    }

    #[test]
    fn test_location_without_country() {
        let mut g = group(&["ACME STORE"]);
        g.location = "HONG KONG".into();
        assert_eq!(
            compose_memo(&g).unwrap(),
            "Location: HONG KONG // [Imported from PDF statement]"
        );
    }

    #[test]
    fn test_all_parts_in_order() {
        let mut g = group(&["ACME", "  line one ", "line two"]);
        g.location = "TOKYO".into();
        g.country = "JP".into();
        g.original_currency = "JPY".into();
        g.original_amount = "1,500".into();
        assert_eq!(
            compose_memo(&g).unwrap(),
            "Location: TOKYO, JP; Original amount: 1,500 JPY; \
             Details: line one, line two // [Imported from PDF statement]"
        );
    }

    #[test]
    fn test_currency_without_amount_is_malformed() {
        let mut g = group(&["ACME"]);
        g.original_currency = "USD".into();
        match compose_memo(&g) {
            Err(ConvertError::MalformedMemo { currency }) => assert_eq!(currency, "USD"),
            other => panic!("expected MalformedMemo, got {:?}", other),
        }
    }
}
