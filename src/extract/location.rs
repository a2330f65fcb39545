//! Location rule: `City` and `Country` properties of the first `Location`.

use crate::models::FieldValue;
use crate::newsml::Element;

/// Compose `"City, Country"` from the first `Location` element.
///
/// Either part may be missing. A `Location` with neither property yields an
/// empty string, which is still a found value.
pub fn extract(root: &Element) -> FieldValue {
    let Some(location) = root.find("Location") else {
        return FieldValue::Absent;
    };

    let property = |formal_name: &str| {
        location
            .find_all("Property")
            .find(|p| p.attr("FormalName") == Some(formal_name))
            .map(|p| p.attr("Value").unwrap_or_default())
    };

    let mut composed = String::new();
    if let Some(city) = property("City") {
        composed.push_str(city);
    }
    if let Some(country) = property("Country") {
        if !composed.is_empty() {
            composed.push_str(", ");
        }
        composed.push_str(country);
    }
    FieldValue::Found(composed)
}
