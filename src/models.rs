//! Data models for extracted NewsML records and their tabular rendering.
//!
//! - [`FieldValue`]: the per-field result of one extraction rule
//! - [`NewsRecord`]: every field extracted from one source document
//! - [`Row`]: a record rendered to optional cells for the CSV/JSON writers
//!
//! A document that fails to parse still yields a [`NewsRecord`], with every
//! content field absent and the `error` indicator set, so every record has
//! the same shape by the time it reaches an output writer.

use serde::Serialize;
use std::path::PathBuf;

/// Error indicator for documents that are not well-formed.
pub const PARSE_FAILURE: &str = "Failed to parse XML file";
/// Error indicator for documents that could not be read from disk.
pub const READ_FAILURE: &str = "Failed to read XML file";
/// Error indicator for documents whose extraction exceeded the time bound.
pub const TIMEOUT_FAILURE: &str = "Timed out parsing XML file";

/// Outcome of a single field rule.
///
/// `Found` also carries sentinel texts that are deliberately content values,
/// such as the headline "not found" message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    #[default]
    Absent,
    Error(String),
}

impl FieldValue {
    pub fn found(text: impl Into<String>) -> Self {
        FieldValue::Found(text.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Text as it appears in an output cell. Errors render as their message.
    pub fn as_cell(&self) -> Option<&str> {
        match self {
            FieldValue::Found(text) | FieldValue::Error(text) => Some(text),
            FieldValue::Absent => None,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Found)
    }
}

/// Fields extracted from one NewsML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRecord {
    /// Source document path.
    pub path: PathBuf,
    pub headline: FieldValue,
    pub topic: FieldValue,
    pub tags: FieldValue,
    pub authors: FieldValue,
    pub date: FieldValue,
    pub content: FieldValue,
    pub location: FieldValue,
    /// Document-level failure; when set every other field is absent.
    pub error: Option<String>,
}

impl NewsRecord {
    /// Degenerate record for a document that produced no fields at all.
    pub fn failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headline: FieldValue::Absent,
            topic: FieldValue::Absent,
            tags: FieldValue::Absent,
            authors: FieldValue::Absent,
            date: FieldValue::Absent,
            content: FieldValue::Absent,
            location: FieldValue::Absent,
            error: Some(message.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Render to output cells, with or without the leading `Path` column.
    pub fn to_row(&self, include_path: bool) -> Row {
        let cell = |value: &FieldValue| value.as_cell().map(str::to_string);
        Row {
            path: include_path.then(|| self.path.display().to_string()),
            headline: cell(&self.headline),
            topic: cell(&self.topic),
            tags: cell(&self.tags),
            authors: cell(&self.authors),
            date: cell(&self.date),
            content: cell(&self.content),
            location: cell(&self.location),
            error: self.error.clone(),
        }
    }
}

/// One output row. `None` cells serialize as empty CSV fields or JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    #[serde(rename = "Path", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(rename = "Headline")]
    pub headline: Option<String>,
    #[serde(rename = "Topic")]
    pub topic: Option<String>,
    #[serde(rename = "Tags")]
    pub tags: Option<String>,
    #[serde(rename = "Authors")]
    pub authors: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Content")]
    pub content: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    pub error: Option<String>,
}

impl Row {
    /// Column headers matching [`Row`]'s serialized field order.
    pub fn columns(include_path: bool) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(9);
        if include_path {
            columns.push("Path");
        }
        columns.extend([
            "Headline", "Topic", "Tags", "Authors", "Date", "Content", "Location", "error",
        ]);
        columns
    }
}
