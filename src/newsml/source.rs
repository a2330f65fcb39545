//! Turning raw document bytes into parser input.
//!
//! Archives mix UTF-8, Latin-1 and the occasional UTF-16 file, and files
//! written on Windows carry CRLF line endings. Before any markup is parsed
//! the bytes are decoded to a `String`, picking the encoding the way an XML
//! processor does:
//!
//! 1. a byte order mark, if present
//! 2. the UTF-16 signature of `<?` without a BOM
//! 3. the `encoding` pseudo-attribute of the XML declaration
//! 4. UTF-8
//!
//! Line endings are then normalized so that `\r\n` and a lone `\r` both
//! become `\n`.

use super::ParseError;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::borrow::Cow;

/// `encoding="..."` inside a leading XML declaration.
static DECLARED_ENCODING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\A\s*<\?xml\s[^>]*?\bencoding\s*=\s*["']([A-Za-z][A-Za-z0-9._-]*)["']"#)
        .expect("valid encoding declaration regex")
});

/// Decode `bytes` and normalize line endings.
///
/// # Errors
///
/// [`ParseError::Encoding`] when the declared encoding is unknown or the
/// bytes are not valid in the detected encoding.
pub fn decode_source(bytes: &[u8]) -> Result<String, ParseError> {
    let (encoding, body) = detect_encoding(bytes)?;
    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| ParseError::Encoding(format!("bytes are not valid {}", encoding.name())))?;
    Ok(normalize_line_endings(text).into_owned())
}

fn detect_encoding(bytes: &[u8]) -> Result<(&'static Encoding, &[u8]), ParseError> {
    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return Ok((encoding, &bytes[bom_length..]));
    }
    if bytes.starts_with(&[0x3C, 0x00, 0x3F, 0x00]) {
        return Ok((UTF_16LE, bytes));
    }
    if bytes.starts_with(&[0x00, 0x3C, 0x00, 0x3F]) {
        return Ok((UTF_16BE, bytes));
    }

    let Some(label) = DECLARED_ENCODING
        .captures(bytes)
        .and_then(|captures| captures.get(1))
    else {
        return Ok((UTF_8, bytes));
    };
    let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
        ParseError::Encoding(format!(
            "unknown encoding {:?}",
            String::from_utf8_lossy(label.as_bytes())
        ))
    })?;
    // A declaration readable as ASCII means the bytes are not UTF-16,
    // whatever the label says.
    Ok((encoding.output_encoding(), bytes))
}

/// Replace `\r\n` and lone `\r` with `\n`.
pub fn normalize_line_endings(text: Cow<'_, str>) -> Cow<'_, str> {
    if !text.contains('\r') {
        return text;
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_default() {
        assert_eq!(decode_source("<p>été</p>".as_bytes()).unwrap(), "<p>été</p>");
    }

    #[test]
    fn test_declared_latin1() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><p>Caf\xe9</p>";
        let text = decode_source(bytes).unwrap();
        assert!(text.ends_with("<p>Café</p>"), "{text}");
    }

    #[test]
    fn test_single_quoted_declaration() {
        let bytes = b"<?xml version='1.0' encoding='latin1'?>\n<p>\xe0</p>";
        assert!(decode_source(bytes).unwrap().ends_with("<p>à</p>"));
    }

    #[test]
    fn test_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<p>X</p>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_source(&bytes).unwrap(), "<p>X</p>");
    }

    #[test]
    fn test_utf16be_without_bom() {
        let bytes: Vec<u8> = "<?xml version=\"1.0\"?><p>é</p>"
            .encode_utf16()
            .flat_map(u16::to_be_bytes)
            .collect();
        assert_eq!(decode_source(&bytes).unwrap(), "<?xml version=\"1.0\"?><p>é</p>");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let bytes = b"\xEF\xBB\xBF<p/>";
        assert_eq!(decode_source(bytes).unwrap(), "<p/>");
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        assert!(matches!(
            decode_source(b"<p>caf\xe9</p>"),
            Err(ParseError::Encoding(_))
        ));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let bytes = b"<?xml version=\"1.0\" encoding=\"klingon\"?><p/>";
        assert!(matches!(decode_source(bytes), Err(ParseError::Encoding(_))));
    }

    #[test]
    fn test_line_endings_normalized() {
        assert_eq!(decode_source(b"<p>a\r\nb\rc\n</p>").unwrap(), "<p>a\nb\nc\n</p>");
    }
}
