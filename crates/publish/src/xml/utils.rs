//! Helpers for turning provider values into XML text.

use std::borrow::Cow;
use std::io::{self, Read};

use base64::engine::general_purpose::STANDARD;
use base64::write::EncoderStringWriter;
use quick_xml::escape::partial_escape;

/// Name of the root element wrapping every published tree.
pub const ROOT_ELEMENT: &str = "data";

/// Converts a Rust boolean to its string representation for XML.
pub fn bool_to_string(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Checks a key against the XML 1.0 `Name` production.
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

// XML 1.0 (fifth edition) section 2.3, NameStartChar.
fn is_name_start_char(c: char) -> bool {
    matches!(c,
        ':' | 'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// NameChar adds digits, '-', '.', middle dot and combining marks.
fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}')
}

/// Returns the first character of `text` that XML 1.0 does not allow.
///
/// Allowed are tab, line feed, carriage return, `U+0020..=U+D7FF`,
/// `U+E000..=U+FFFD` and `U+10000` upwards.
pub fn find_invalid_char(text: &str) -> Option<char> {
    text.chars().find(|&c| {
        !matches!(c,
            '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}')
    })
}

/// Escapes element text: `&`, `<`, `>` and carriage returns.
///
/// A raw `\r` would be normalized away by any parser, so it is written as a
/// character reference.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = partial_escape(text);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

/// Reads a stream to its end and returns it as padded standard base64.
pub fn encode_base64(mut reader: impl Read) -> io::Result<String> {
    let mut encoder = EncoderStringWriter::new(&STANDARD);
    io::copy(&mut reader, &mut encoder)?;
    Ok(encoder.into_inner())
}
