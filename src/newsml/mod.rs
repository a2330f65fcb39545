//! NewsML document model.
//!
//! NewsML 1.2 files are plain XML, but the extraction rules only ever need a
//! small, ElementTree-like view of them: element names, attributes, the text
//! that precedes an element's first child, and the children themselves.
//!
//! - [`source`]: decodes raw bytes (BOM, declared encoding, line endings)
//! - [`document`]: parses decoded text into a [`Document`] with `quick-xml`
//! - [`query`]: the traversal helpers the field rules are written against

pub mod document;
pub mod query;
pub mod source;

pub use document::{Document, Element, ParseError};
