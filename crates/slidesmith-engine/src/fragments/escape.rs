//! HTML escaping for generated fragments.
//!
//! `&`, `<` and `>` go through `html_escape::encode_text`; the two quote
//! characters are mapped here so the output is identical for content and
//! attribute positions apart from the apostrophe entity.

use html_escape::encode_text;

/// Escapes text placed as element content: `& < > " '`.
pub fn escape_html(text: &str) -> String {
    encode_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Escapes text placed inside a double-quoted attribute value.
pub fn escape_attribute(text: &str) -> String {
    encode_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
