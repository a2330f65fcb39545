//! Tags rule: `FormalName` of every `DescriptiveMetadata/OfInterestTo`.

use crate::models::FieldValue;
use crate::newsml::Element;
use itertools::Itertools;

/// Separator NewsML providers use to pack a category path into one value.
const HIERARCHY_SEPARATOR: &str = "--";
const TAG_SEPARATOR: &str = ", ";

/// Comma-joined interest tags, with `--` category paths flattened into the list.
pub fn extract(root: &Element) -> FieldValue {
    let joined = root
        .path("DescriptiveMetadata", "OfInterestTo")
        .filter_map(|tag| tag.attr("FormalName"))
        .filter(|name| !name.is_empty())
        .join(TAG_SEPARATOR);

    if joined.is_empty() {
        return FieldValue::Absent;
    }
    FieldValue::Found(joined.replace(HIERARCHY_SEPARATOR, TAG_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newsml::Document;

    fn tags(xml: &str) -> FieldValue {
        extract(Document::parse(xml.as_bytes()).unwrap().root())
    }

    #[test]
    fn test_hierarchy_flattened() {
        let value = tags(
            r#"<NewsML><DescriptiveMetadata>
                <OfInterestTo FormalName="SPORT--Tennis"/>
                <OfInterestTo FormalName="SPORT--Football"/>
            </DescriptiveMetadata></NewsML>"#,
        );
        assert_eq!(value, FieldValue::found("SPORT, Tennis, SPORT, Football"));
    }

    #[test]
    fn test_missing_and_empty_names_skipped() {
        let value = tags(
            r#"<NewsML><DescriptiveMetadata>
                <OfInterestTo/>
                <OfInterestTo FormalName=""/>
                <OfInterestTo FormalName="ECO"/>
                <OfInterestTo FormalName="ECO"/>
            </DescriptiveMetadata></NewsML>"#,
        );
        assert_eq!(value, FieldValue::found("ECO, ECO"));
    }

    #[test]
    fn test_tags_absent() {
        assert!(tags("<NewsML/>").is_absent());
        assert!(tags("<NewsML><DescriptiveMetadata><OfInterestTo/></DescriptiveMetadata></NewsML>").is_absent());
        assert!(tags(r#"<NewsML><OfInterestTo FormalName="X"/></NewsML>"#).is_absent());
    }
}
