use regex::{NoExpand, Regex, RegexBuilder};

use crate::text::{byte_to_utf16, utf16_to_byte};

/// A match as an editor sees it: `[start, end)` in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMatch {
    pub start: usize,
    pub end: usize,
}

fn literal(query: &str, case_sensitive: bool) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!case_sensitive)
        .build()
        .ok()
}

/// Every non-overlapping occurrence of `query`, taken literally.
pub fn find_matches(doc: &str, query: &str, case_sensitive: bool) -> Vec<TextMatch> {
    let Some(re) = literal(query, case_sensitive) else {
        return Vec::new();
    };
    re.find_iter(doc)
        .map(|m| TextMatch {
            start: byte_to_utf16(doc, m.start()),
            end: byte_to_utf16(doc, m.end()),
        })
        .collect()
}

/// Replaces one match previously returned by [`find_matches`] on `doc`.
pub fn replace_range(doc: &str, range: TextMatch, replacement: &str) -> String {
    let start = utf16_to_byte(doc, range.start);
    let end = utf16_to_byte(doc, range.end).max(start);
    format!("{}{replacement}{}", &doc[..start], &doc[end..])
}

/// Replaces every occurrence and reports how many there were.
pub fn replace_all(doc: &str, query: &str, replacement: &str, case_sensitive: bool) -> (String, usize) {
    let Some(re) = literal(query, case_sensitive) else {
        return (doc.to_string(), 0);
    };
    let count = re.find_iter(doc).count();
    (re.replace_all(doc, NoExpand(replacement)).into_owned(), count)
}
