//! Output generation for extracted records.
//!
//! # Submodules
//!
//! - [`csv`]: writes the record table as comma-separated values (default)
//! - [`json`]: writes the same rows as a JSON array
//!
//! Both writers receive [`Row`]s, so every record, including documents that
//! failed to parse, is rendered with the same column set.

pub mod csv;
pub mod json;

use crate::models::{NewsRecord, Row};
use clap::ValueEnum;
use serde::Deserialize;
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Table file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Render `records` and write them to `path` in `format`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), ?format))]
pub async fn write_records(
    records: &[NewsRecord],
    path: &Path,
    format: OutputFormat,
    include_path: bool,
) -> Result<(), Box<dyn Error>> {
    let rows: Vec<Row> = records.iter().map(|r| r.to_row(include_path)).collect();
    let bytes = match format {
        OutputFormat::Csv => csv::render(&rows, include_path)?,
        OutputFormat::Json => json::render(&rows)?,
    };
    tokio::fs::write(path, bytes).await?;
    info!(rows = rows.len(), "Wrote record table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, PARSE_FAILURE};

    #[tokio::test]
    async fn test_write_records_csv_and_json() {
        let temp = tempfile::tempdir().unwrap();
        let mut ok = NewsRecord::failed("a.xml", "");
        ok.error = None;
        ok.headline = FieldValue::found("Hello");
        let records = vec![ok, NewsRecord::failed("b.xml", PARSE_FAILURE)];

        let csv_path = temp.path().join("out.csv");
        write_records(&records, &csv_path, OutputFormat::Csv, true).await.unwrap();
        let text = std::fs::read_to_string(&csv_path).unwrap();
        assert_eq!(text.lines().count(), 3);

        let json_path = temp.path().join("out.json");
        write_records(&records, &json_path, OutputFormat::Json, false).await.unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["error"], PARSE_FAILURE);
    }
}
