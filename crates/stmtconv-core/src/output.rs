use crate::error::ConvertError;
use crate::model::{OutputRecord, OUTPUT_COLUMNS};
use std::io;
use std::path::{Path, PathBuf};

pub const OUTPUT_PREFIX: &str = "converted_pdf_";

/// Output file next to the input: `converted_pdf_<bank>_<stem>.csv`.
pub fn output_path(input: &Path, bank_name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}_{}.csv", OUTPUT_PREFIX, bank_name, stem))
}

/// Write records as CSV. The header row is always written, so a statement
/// without transactions still yields a well-formed file.
pub fn write_records<W: io::Write>(records: &[OutputRecord], writer: W) -> Result<(), ConvertError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv(records: &[OutputRecord], path: &Path) -> Result<(), ConvertError> {
    let file = std::fs::File::create(path)?;
    write_records(records, io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(payee: &str, memo: &str) -> OutputRecord {
        OutputRecord {
            post_date: "03/01/2024".into(),
            trans_date: "02/01/2024".into(),
            payee: payee.into(),
            hkd_amount: "-1,234.56".into(),
            memo: memo.into(),
        }
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("/tmp/stmts/2024-01.pdf"), "hsbc");
        assert_eq!(path, PathBuf::from("/tmp/stmts/converted_pdf_hsbc_2024-01.csv"));
    }

    #[test]
    fn test_output_path_relative() {
        let path = output_path(Path::new("jan.pdf"), "hsbc");
        assert_eq!(path, PathBuf::from("converted_pdf_hsbc_jan.csv"));
    }

    #[test]
    fn test_write_records_quotes_fields() {
        let mut buf = Vec::new();
        write_records(&[record("ACME, INC", "[Imported from PDF statement]")], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "post_date,trans_date,payee,hkd_amount,memo\n\
             03/01/2024,02/01/2024,\"ACME, INC\",\"-1,234.56\",[Imported from PDF statement]\n"
        );
    }

    #[test]
    fn test_write_records_empty_has_header() {
        let mut buf = Vec::new();
        write_records(&[], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "post_date,trans_date,payee,hkd_amount,memo\n"
        );
    }
}
