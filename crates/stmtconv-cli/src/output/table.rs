use rust_decimal::Decimal;
use stmtconv_core::model::{Statement, StatementDateSource};

/// Render converted transactions as an aligned text table with totals.
pub fn format_statement(statement: &Statement) -> String {
    let mut lines = Vec::new();

    let date_note = match statement.statement_date_source {
        StatementDateSource::Extracted => "",
        StatementDateSource::Fallback => " (not found in PDF, fallback used)",
    };
    lines.push(format!(
        "Statement date: {}{}",
        statement.statement_date, date_note
    ));
    lines.push(format!(
        "Pages: {}  Transactions: {}",
        statement.page_count,
        statement.records.len()
    ));
    lines.push(String::new());

    if statement.records.is_empty() {
        lines.push("No transactions found.".to_string());
        return lines.join("\n") + "\n";
    }

    let records = &statement.records;
    let w_post = column_width("Post date", records.iter().map(|r| &r.post_date));
    let w_trans = column_width("Trans date", records.iter().map(|r| &r.trans_date));
    let w_payee = column_width("Payee", records.iter().map(|r| &r.payee));
    let w_amount = column_width("HKD", records.iter().map(|r| &r.hkd_amount));

    lines.push(format!(
        "{:<w_post$}  {:<w_trans$}  {:<w_payee$}  {:>w_amount$}  Memo",
        "Post date", "Trans date", "Payee", "HKD"
    ));
    lines.push("-".repeat(w_post + w_trans + w_payee + w_amount + 14));

    for r in records {
        lines.push(format!(
            "{:<w_post$}  {:<w_trans$}  {:<w_payee$}  {:>w_amount$}  {}",
            r.post_date, r.trans_date, r.payee, r.hkd_amount, r.memo
        ));
    }

    let (inflow, outflow) = totals(statement);
    lines.push(String::new());
    lines.push(format!("  Inflow:  {}", inflow));
    lines.push(format!("  Outflow: {}", outflow));
    lines.push(format!("  Net:     {}", inflow + outflow));

    lines.join("\n") + "\n"
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a String>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

/// Sum of positive and of negative amounts; unparseable amounts are skipped.
fn totals(statement: &Statement) -> (Decimal, Decimal) {
    statement
        .records
        .iter()
        .filter_map(|r| r.amount())
        .fold((Decimal::ZERO, Decimal::ZERO), |(inflow, outflow), amount| {
            if amount.is_sign_negative() {
                (inflow, outflow + amount)
            } else {
                (inflow + amount, outflow)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stmtconv_core::model::OutputRecord;

    fn record(payee: &str, amount: &str) -> OutputRecord {
        OutputRecord {
            post_date: "03/01/2024".into(),
            trans_date: "02/01/2024".into(),
            payee: payee.into(),
            hkd_amount: amount.into(),
            memo: "[Imported from PDF statement]".into(),
        }
    }

    fn statement(records: Vec<OutputRecord>) -> Statement {
        Statement {
            statement_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            statement_date_source: StatementDateSource::Extracted,
            page_count: 1,
            records,
        }
    }

    #[test]
    fn test_totals_split_by_sign() {
        let s = statement(vec![
            record("A", "-1,234.56"),
            record("B", "2,000.00"),
            record("C", "-0.44"),
        ]);
        let (inflow, outflow) = totals(&s);
        assert_eq!(inflow, dec!(2000.00));
        assert_eq!(outflow, dec!(-1235.00));
    }

    #[test]
    fn test_format_lists_records_and_net() {
        let text = format_statement(&statement(vec![
            record("ACME", "-10.00"),
            record("REFUND", "4.00"),
        ]));
        assert!(text.contains("Transactions: 2"));
        assert!(text.contains("ACME"));
        assert!(text.contains("Net:     -6.00"));
    }

    #[test]
    fn test_format_empty() {
        let text = format_statement(&statement(Vec::new()));
        assert!(text.contains("No transactions found."));
    }
}
