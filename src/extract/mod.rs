//! Field extraction for NewsML documents.
//!
//! Each field has its own rule module. Rules are independent of each other
//! and never abort record assembly; the only document-level failure is the
//! primary parse itself.
//!
//! | Field    | Module       | Source elements                                 |
//! |----------|--------------|-------------------------------------------------|
//! | Headline | [`headline`] | `NewsLines/HeadLine`, then `body.content/p`     |
//! | Topic    | [`topic`]    | `Identification/NameLabel`                      |
//! | Tags     | [`tags`]     | `DescriptiveMetadata/OfInterestTo@FormalName`   |
//! | Authors  | [`authors`]  | `ByLine`, then `Provider/Party@FormalName`      |
//! | Date     | [`date`]     | `NewsManagement/FirstCreated`                   |
//! | Content  | [`content`]  | `ContentItem//DataContent//p`                   |
//! | Location | [`location`] | `Location//Property[@FormalName=City,Country]`  |

pub mod authors;
pub mod content;
pub mod date;
pub mod headline;
pub mod location;
pub mod tags;
pub mod topic;

use crate::models::{FieldValue, NewsRecord, PARSE_FAILURE};
use crate::newsml::Document;
use crate::utils::truncate_for_log;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Extract one record from a document's raw bytes.
///
/// A document that is not well-formed yields [`NewsRecord::failed`] with
/// [`PARSE_FAILURE`]; otherwise every rule runs against the parsed tree.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn extract_record(path: &Path, source: &[u8]) -> NewsRecord {
    let document = match Document::parse(source) {
        Ok(document) => document,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Document is not well-formed");
            return NewsRecord::failed(path, PARSE_FAILURE);
        }
    };
    let root = document.root();

    let record = NewsRecord {
        path: path.to_path_buf(),
        headline: headline::extract(root),
        topic: topic::extract(root),
        tags: tags::extract(root),
        authors: authors::extract(|| Document::parse(source)),
        date: date::extract(root),
        content: content::extract(root),
        location: location::extract(root),
        error: None,
    };

    debug!(
        headline = %truncate_for_log(record.headline.as_cell().unwrap_or_default(), 80),
        has_date = matches!(record.date, FieldValue::Found(_)),
        content_bytes = record.content.as_cell().map_or(0, str::len),
        "Extracted record"
    );
    record
}
