//! Editor cursors are UTF-16 code-unit offsets (the unit a browser
//! textarea's `selectionStart` uses); Rust strings are indexed by UTF-8
//! bytes. These helpers translate at the API boundary.

/// Number of UTF-16 code units needed to encode `s`.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// Converts a byte offset into a UTF-16 offset.
///
/// Offsets past the end clamp to the end; offsets inside a multi-byte
/// character count up to the character's start.
pub fn byte_to_utf16(text: &str, byte: usize) -> usize {
    let mut units = 0;
    for (i, ch) in text.char_indices() {
        if i >= byte {
            break;
        }
        if i + ch.len_utf8() > byte {
            break;
        }
        units += ch.len_utf16();
    }
    units
}

/// Converts a UTF-16 offset into a byte offset on a char boundary.
///
/// Offsets past the end clamp to `text.len()`. An offset that lands between
/// the two halves of a surrogate pair floors to the start of that character.
pub fn utf16_to_byte(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (i, ch) in text.char_indices() {
        let next = seen + ch.len_utf16();
        if next > units {
            return i;
        }
        seen = next;
    }
    text.len()
}
