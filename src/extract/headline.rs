//! Headline rule: `NewsLines/HeadLine`, falling back to the first body paragraph.

use crate::models::FieldValue;
use crate::newsml::Element;

/// Value used when neither a headline nor a first paragraph has any text.
pub const HEADLINE_NOT_FOUND: &str = "Headline or alternative text not found in the file.";

/// Extract the headline.
///
/// The first `HeadLine` under `NewsLines` wins when it has non-blank text.
/// Otherwise the first `p` directly under `body.content` is used. Both are
/// trimmed. When neither yields text the result is [`HEADLINE_NOT_FOUND`],
/// reported as a found value rather than an absence.
pub fn extract(root: &Element) -> FieldValue {
    non_blank(root.path("NewsLines", "HeadLine").next())
        .or_else(|| non_blank(root.path("body.content", "p").next()))
        .map_or_else(|| FieldValue::found(HEADLINE_NOT_FOUND), FieldValue::found)
}

fn non_blank(element: Option<&Element>) -> Option<&str> {
    element
        .and_then(Element::text)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newsml::Document;

    fn headline(xml: &str) -> FieldValue {
        extract(Document::parse(xml.as_bytes()).unwrap().root())
    }

    #[test]
    fn test_headline_wins_over_paragraph() {
        let value = headline(
            "<NewsML><NewsLines><HeadLine>  Floods in Valencia \n</HeadLine></NewsLines>\
             <body><body.content><p>First paragraph</p></body.content></body></NewsML>",
        );
        assert_eq!(value, FieldValue::found("Floods in Valencia"));
    }

    #[test]
    fn test_falls_back_to_first_paragraph() {
        let value = headline(
            "<NewsML><body><body.content><p> First paragraph </p><p>Second</p></body.content></body></NewsML>",
        );
        assert_eq!(value, FieldValue::found("First paragraph"));
    }

    #[test]
    fn test_blank_headline_falls_back() {
        let value = headline(
            "<NewsML><NewsLines><HeadLine>   </HeadLine></NewsLines>\
             <body.content><p>Lead</p></body.content></NewsML>",
        );
        assert_eq!(value, FieldValue::found("Lead"));
    }

    #[test]
    fn test_sentinel_when_nothing_found() {
        assert_eq!(headline("<NewsML/>"), FieldValue::found(HEADLINE_NOT_FOUND));
        assert_eq!(
            headline("<NewsML><NewsLines><HeadLine/></NewsLines><body.content><p/></body.content></NewsML>"),
            FieldValue::found(HEADLINE_NOT_FOUND)
        );
    }

    #[test]
    fn test_headline_outside_newslines_ignored() {
        let value = headline("<NewsML><HeadLine>Loose</HeadLine></NewsML>");
        assert_eq!(value, FieldValue::found(HEADLINE_NOT_FOUND));
    }
}
