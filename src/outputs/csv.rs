//! CSV rendering of the record table.
//!
//! The header row is always written, even for an empty table, and absent
//! cells are empty fields. Multi-line content is quoted by the `csv` writer.

use crate::models::Row;
use std::error::Error;

/// Serialize `rows` to CSV bytes, header first.
pub fn render(rows: &[Row], include_path: bool) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(Row::columns(include_path))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}
