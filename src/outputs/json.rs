//! JSON rendering of the record table.
//!
//! Rows are written as a pretty-printed array of objects keyed by column
//! name; absent cells are `null`.

use crate::models::Row;
use std::error::Error;

/// Serialize `rows` to JSON bytes.
pub fn render(rows: &[Row]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut bytes = serde_json::to_vec_pretty(rows)?;
    bytes.push(b'\n');
    Ok(bytes)
}
