//! Topic rule: `Identification/NameLabel`.

use crate::models::FieldValue;
use crate::newsml::Element;

/// Text of the first `NameLabel` under an `Identification` section, verbatim.
pub fn extract(root: &Element) -> FieldValue {
    root.path("Identification", "NameLabel")
        .next()
        .and_then(Element::text)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .into()
}
