use stmtconv_core::error::ConvertError;
use stmtconv_core::model::Statement;

pub fn print(statement: &Statement) -> Result<(), ConvertError> {
    let json = serde_json::to_string_pretty(statement)?;
    println!("{json}");
    Ok(())
}
