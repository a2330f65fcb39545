//! Well-formedness checking parser that builds an owned element tree.
//!
//! The parser is pure: the same bytes always produce the same tree or the
//! same [`ParseError`], and no partial tree ever escapes a failed parse.
//!
//! Input goes through [`decode_source`] first, so the tree only ever sees
//! `\n` line endings. Attribute values additionally have literal tabs and
//! newlines turned into spaces, and general entities declared in the
//! DOCTYPE internal subset are expanded as text.

use super::source::decode_source;
use once_cell::sync::Lazy;
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;
use thiserror::Error;

/// `<!ENTITY name "value">` in an internal subset. Parameter and external
/// entities do not match and stay unresolvable.
static ENTITY_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<!ENTITY\s+([A-Za-z_:][A-Za-z0-9._:-]*)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
        .expect("valid entity declaration regex")
});

/// Reasons a document is rejected as not well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}: {message}")]
    Syntax { position: u64, message: String },
    #[error("cannot decode document: {0}")]
    Encoding(String),
    #[error("unresolvable entity reference: {0}")]
    Entity(String),
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("text found outside the root element")]
    TextOutsideRoot,
}

/// Internal general entities, on top of the five predefined ones.
#[derive(Debug, Default)]
struct Entities {
    declared: HashMap<String, String>,
}

impl Entities {
    fn from_doctype(doctype: &str) -> Result<Self, ParseError> {
        let mut entities = Entities::default();
        for captures in ENTITY_DECLARATION.captures_iter(doctype) {
            let raw = captures
                .get(2)
                .or_else(|| captures.get(3))
                .map_or("", |m| m.as_str());
            // Replacement text may reference entities declared before it.
            let value = entities.resolve(raw)?;
            // The first declaration of a name is binding.
            entities
                .declared
                .entry(captures[1].to_string())
                .or_insert(value);
        }
        Ok(entities)
    }

    fn resolve(&self, raw: &str) -> Result<String, ParseError> {
        unescape_with(raw, |name| {
            self.declared
                .get(name)
                .map(String::as_str)
                .or_else(|| resolve_predefined_entity(name))
        })
        .map(Cow::into_owned)
        .map_err(|e| ParseError::Entity(e.to_string()))
    }
}

/// One element of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) text: Option<String>,
    pub(crate) children: Vec<Element>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            text: None,
            children: Vec::new(),
        }
    }

    /// Local name, with any namespace prefix removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Character data before the first child element, `None` when there is none.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    fn push_text(&mut self, text: &str) {
        // Text after a child element is that child's tail; rules never read it.
        if text.is_empty() || !self.children.is_empty() {
            return;
        }
        self.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// A successfully parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parse raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for unclosed or mismatched tags, unknown
    /// entities, truncated input, bytes that do not decode in the detected
    /// encoding, and documents without exactly one root element.
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let source = decode_source(bytes)?;
        let mut reader = Reader::from_str(&source);
        let mut entities = Entities::default();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| ParseError::Syntax {
                position: reader.buffer_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(start) => {
                    if open.is_empty() && root.is_some() {
                        return Err(ParseError::MultipleRoots);
                    }
                    open.push(start_element(&reader, &start, &entities)?);
                }
                Event::Empty(start) => {
                    let element = start_element(&reader, &start, &entities)?;
                    close_element(element, &mut open, &mut root)?;
                }
                Event::End(_) => {
                    // quick-xml already verified the end name against the open tag.
                    let element = open.pop().ok_or_else(|| ParseError::Syntax {
                        position: reader.buffer_position() as u64,
                        message: "end tag without a matching start tag".to_string(),
                    })?;
                    close_element(element, &mut open, &mut root)?;
                }
                Event::Text(text) => {
                    let raw = decode(&reader, &text)?;
                    append_text(&mut open, &entities.resolve(&raw)?)?;
                }
                Event::CData(data) => {
                    let raw = decode(&reader, &data)?;
                    append_text(&mut open, &raw)?;
                }
                Event::GeneralRef(reference) => {
                    let name = decode(&reader, &reference)?;
                    append_text(&mut open, &entities.resolve(&format!("&{name};"))?)?;
                }
                Event::DocType(doctype) => {
                    let declaration = decode(&reader, &doctype)?;
                    entities = Entities::from_doctype(&declaration)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.pop() {
            return Err(ParseError::Unclosed(unclosed.name));
        }
        root.map(|root| Document { root }).ok_or(ParseError::NoRoot)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

fn decode<'b>(reader: &Reader<&[u8]>, bytes: &'b [u8]) -> Result<Cow<'b, str>, ParseError> {
    reader
        .decoder()
        .decode(bytes)
        .map_err(|e| ParseError::Encoding(e.to_string()))
}

fn start_element(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
    entities: &Entities,
) -> Result<Element, ParseError> {
    let local = start.local_name();
    let name = decode(reader, local.as_ref())?.into_owned();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ParseError::Syntax {
            position: reader.buffer_position() as u64,
            message: e.to_string(),
        })?;
        let key = decode(reader, attribute.key.as_ref())?.into_owned();
        // Literal whitespace becomes spaces; character references survive.
        let raw = decode(reader, &attribute.value)?.replace(['\t', '\n', '\r'], " ");
        attributes.push((key, entities.resolve(&raw)?));
    }
    Ok(Element::new(name, attributes))
}

fn close_element(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(ParseError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(open: &mut [Element], text: &str) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(element) => element.push_text(text),
        None if text.trim().is_empty() => {}
        None => return Err(ParseError::TextOutsideRoot),
    }
    Ok(())
}
