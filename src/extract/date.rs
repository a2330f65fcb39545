//! Date rule: `NewsManagement/FirstCreated`, normalized to UTC.
//!
//! NewsML timestamps are compact ISO 8601 basic format, either with a
//! literal `Z` or an explicit numeric offset:
//!
//! ```text
//! 20230501T123000Z      -> 2023-05-01T12:30:00+0000
//! 20230501T123000+0200  -> 2023-05-01T10:30:00+0000
//! ```

use crate::models::FieldValue;
use crate::newsml::Element;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const OFFSET_FORMAT: &str = "%Y%m%dT%H%M%S%z";
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Normalize a `FirstCreated` timestamp to UTC with an explicit `+0000` offset.
///
/// # Errors
///
/// Returns the offset-format parse error when the text matches neither the
/// `Z` form nor the numeric-offset form.
pub fn normalize_timestamp(raw: &str) -> Result<String, chrono::ParseError> {
    let utc = match NaiveDateTime::parse_from_str(raw, UTC_FORMAT) {
        Ok(naive) => naive.and_utc(),
        Err(_) => DateTime::parse_from_str(raw, OFFSET_FORMAT)?.with_timezone(&Utc),
    };
    Ok(utc.format(OUTPUT_FORMAT).to_string())
}

/// Extract and normalize the creation timestamp.
///
/// An unparseable timestamp becomes a field-level error rather than failing
/// the whole record.
pub fn extract(root: &Element) -> FieldValue {
    let Some(first_created) = root.path("NewsManagement", "FirstCreated").next() else {
        return FieldValue::Absent;
    };

    let raw = first_created.text().unwrap_or_default().trim();
    match normalize_timestamp(raw) {
        Ok(normalized) => FieldValue::Found(normalized),
        Err(e) => {
            warn!(timestamp = %raw, error = %e, "Unparseable FirstCreated timestamp");
            FieldValue::Error(format!("Unparseable FirstCreated timestamp: {raw}"))
        }
    }
}
