//! # Tag Scanner
//!
//! A forward, regex-driven scanner that turns an HTML string into a stream
//! of tag events. It is deliberately not an HTML parser: there is no entity
//! decoding, comments are not recognised, and anything that does not look
//! like `<name ...>` or `</name>` is skipped without complaint. Documents
//! are user-typed and frequently half-finished, so the scanner never fails.
//!
//! Both the validator's syntax pass and the element outline in
//! [`hierarchy`] consume these events.

pub mod hierarchy;

use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

use crate::text::Span;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^>]*)>").unwrap());

/// Void elements: never pushed onto a nesting stack.
pub const SELF_CLOSING_TAGS: &[&str] = &[
    "img", "br", "hr", "input", "meta", "link", "area", "base", "col", "embed", "source",
    "track", "wbr",
];

pub fn is_void_tag(name: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&name)
}

/// One opening or closing tag found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEvent<'a> {
    pub is_closing: bool,
    /// Lowercased tag name.
    pub name: String,
    /// Everything between the name and `>`, untouched (may include a
    /// trailing `/`).
    pub raw_attributes: &'a str,
    /// Byte span of the whole tag including angle brackets.
    pub span: Span,
    explicit_self_close: bool,
}

impl TagEvent<'_> {
    /// True for void element names or an explicit `/>`.
    pub fn is_self_closing(&self) -> bool {
        self.explicit_self_close || is_void_tag(&self.name)
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Iterator over the tag events of a document.
pub struct TagScanner<'a> {
    matches: CaptureMatches<'static, 'a>,
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = TagEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.matches.next()?;
        let whole = caps.get(0)?;
        let raw_attributes = caps.get(3).map_or("", |m| m.as_str());
        Some(TagEvent {
            is_closing: caps.get(1).is_some_and(|m| !m.is_empty()),
            name: caps.get(2).map_or(String::new(), |m| m.as_str().to_ascii_lowercase()),
            raw_attributes,
            span: Span::new(whole.start(), whole.end()),
            explicit_self_close: whole.as_str().ends_with("/>"),
        })
    }
}

/// Scans `html` from the start, yielding every tag the pattern recognises.
pub fn scan_tags(html: &str) -> TagScanner<'_> {
    TagScanner {
        matches: TAG_RE.captures_iter(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(html: &str) -> Vec<(bool, String)> {
        scan_tags(html).map(|t| (t.is_closing, t.name)).collect()
    }

    #[test]
    fn yields_open_and_close_events_in_order() {
        assert_eq!(
            names("<div><span>x</span></div>"),
            vec![
                (false, "div".to_string()),
                (false, "span".to_string()),
                (true, "span".to_string()),
                (true, "div".to_string()),
            ]
        );
    }

    #[test]
    fn names_are_lowercased() {
        assert_eq!(names("<DIV></Div>")[1], (true, "div".to_string()));
    }

    #[test]
    fn records_offsets_and_attributes() {
        let html = "ab<p class=\"x\">";
        let ev = scan_tags(html).next().unwrap();
        assert_eq!(ev.span, Span::new(2, 15));
        assert_eq!(ev.raw_attributes, " class=\"x\"");
    }

    #[test]
    fn void_and_explicit_self_closing() {
        let evs: Vec<_> = scan_tags("<img src=\"a\"><br><custom-thing/><x-y /><span>").collect();
        assert!(evs[0].is_self_closing());
        assert!(evs[1].is_self_closing());
        assert!(evs[2].is_self_closing());
        assert!(!evs.last().unwrap().is_self_closing());
    }

    #[test]
    fn malformed_text_is_skipped() {
        assert!(names("< div> <!-- note --> <!DOCTYPE html> a < b").is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(scan_tags("").count(), 0);
    }
}
