//! Authors rule: first `ByLine`, falling back to the provider's `Party`.
//!
//! Unlike the other rules this one does not read the tree built for the rest
//! of the record. It is handed a re-parse capability over the document's raw
//! bytes and parses them again, so its failure mode is local: a failed
//! re-parse only turns this field into [`AUTHOR_PARSE_ERROR`].

use crate::models::FieldValue;
use crate::newsml::{Document, Element, ParseError};
use tracing::warn;

/// Authors value when the independent re-parse fails.
pub const AUTHOR_PARSE_ERROR: &str = "XML Parse Error";

/// Re-parse the document and extract the author or provider name.
pub fn extract<F>(reparse: F) -> FieldValue
where
    F: FnOnce() -> Result<Document, ParseError>,
{
    match reparse() {
        Ok(document) => from_tree(document.root()),
        Err(e) => {
            warn!(error = %e, "Re-parse for authors failed");
            FieldValue::Error(AUTHOR_PARSE_ERROR.to_string())
        }
    }
}

/// Author lookup over an already parsed tree.
///
/// The first `ByLine` anywhere (root included) wins with its raw, untrimmed
/// text. Without one, the first `Provider` whose direct `Party` child has a
/// `FormalName` supplies the name.
pub fn from_tree(root: &Element) -> FieldValue {
    if let Some(byline) = root.iter().find(|e| e.name() == "ByLine") {
        return FieldValue::found(byline.text().unwrap_or_default());
    }

    root.iter()
        .filter(|e| e.name() == "Provider")
        .find_map(|provider| provider.child("Party")?.attr("FormalName"))
        .map(str::to_string)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors(xml: &str) -> FieldValue {
        extract(|| Document::parse(xml.as_bytes()))
    }

    #[test]
    fn test_byline_raw_text() {
        let value = authors(
            r#"<NewsML><NewsLines><ByLine> By Jane Doe </ByLine><ByLine>Second</ByLine></NewsLines>
               <Provider><Party FormalName="AFP"/></Provider></NewsML>"#,
        );
        assert_eq!(value, FieldValue::found(" By Jane Doe "));
    }

    #[test]
    fn test_empty_byline_still_wins() {
        let value = authors(r#"<NewsML><ByLine/><Provider><Party FormalName="AFP"/></Provider></NewsML>"#);
        assert_eq!(value, FieldValue::found(""));
    }

    #[test]
    fn test_provider_fallback() {
        let value = authors(
            r#"<NewsML><AdministrativeMetadata>
                 <Provider><Party/></Provider>
                 <Provider><Party FormalName="Reuters"/></Provider>
               </AdministrativeMetadata></NewsML>"#,
        );
        assert_eq!(value, FieldValue::found("Reuters"));
    }

    #[test]
    fn test_party_must_be_direct_child() {
        let value = authors(r#"<NewsML><Provider><Wrap><Party FormalName="AFP"/></Wrap></Provider></NewsML>"#);
        assert!(value.is_absent());
    }

    #[test]
    fn test_absent_without_byline_or_provider() {
        assert!(authors("<NewsML><NewsItem/></NewsML>").is_absent());
    }

    #[test]
    fn test_reparse_failure_is_local_sentinel() {
        let value = extract(|| Err(ParseError::NoRoot));
        assert_eq!(value, FieldValue::Error(AUTHOR_PARSE_ERROR.to_string()));
        assert_eq!(value.as_cell(), Some("XML Parse Error"));
    }
}
