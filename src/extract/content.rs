//! Content rule: body paragraphs of every `ContentItem/DataContent`.

use crate::models::FieldValue;
use crate::newsml::Element;
use itertools::Itertools;

/// Newline-joined text of every `p` inside `DataContent` inside `ContentItem`.
///
/// Always a found value; a document without paragraphs yields `""`.
pub fn extract(root: &Element) -> FieldValue {
    let text = root
        .find_all("ContentItem")
        .flat_map(|item| item.find_all("DataContent"))
        .flat_map(|data| data.find_all("p"))
        .filter_map(Element::text)
        .filter(|text| !text.is_empty())
        .join("\n");
    FieldValue::Found(text)
}
