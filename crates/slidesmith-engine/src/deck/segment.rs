use std::sync::LazyLock;

use regex::Regex;

use crate::text::{Span, utf16_to_byte};

/// Opening tag of a slide: a `div` whose class list starts with the token
/// `slide` (so `class="slide slide-split"` counts, `class="slide-table"`
/// does not).
pub(crate) const SLIDE_OPEN_PATTERN: &str = r#"<div\s+class="slide(?:\s[^"]*)?"[^>]*>"#;

pub(crate) static SLIDE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SLIDE_OPEN_PATTERN).unwrap());

const DIV_OPEN: &str = "<div";
const DIV_CLOSE: &str = "</div>";

/// One slide region of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// The slide's HTML from `<div class="slide"…>` through its matching
    /// `</div>`.
    pub html: String,
    /// Byte offset of the opening `<`.
    pub start: usize,
    /// Byte offset just past the closing `</div>`.
    pub end: usize,
}

impl Slide {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// Finds the end of a slide whose opening tag ends at `body_start`.
///
/// Walks forward with a depth counter that starts at 1, comparing the next
/// `<div` against the next `</div>`. Returns the offset just past the
/// matching `</div>`, or `None` if the document ends first.
pub(crate) fn find_slide_end(doc: &str, body_start: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = body_start;

    while pos < doc.len() {
        let rest = &doc[pos..];
        let next_close = rest.find(DIV_CLOSE)? + pos;
        match rest.find(DIV_OPEN).map(|i| i + pos) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                pos = next_open + DIV_OPEN.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(next_close + DIV_CLOSE.len());
                }
                pos = next_close + DIV_CLOSE.len();
            }
        }
    }

    None
}

/// Spans of every top-level, terminated slide in document order.
///
/// An opening tag that sits inside an earlier slide's span is part of that
/// slide, not a slide of its own. Unterminated slides are dropped.
pub(crate) fn slide_spans(doc: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for m in SLIDE_OPEN_RE.find_iter(doc) {
        if spans.last().is_some_and(|prev| m.start() < prev.end) {
            continue;
        }
        if let Some(end) = find_slide_end(doc, m.end()) {
            spans.push(Span::new(m.start(), end));
        }
    }
    spans
}

/// Number of slide opening tags, terminated or not.
pub(crate) fn count_slide_openings(doc: &str) -> usize {
    SLIDE_OPEN_RE.find_iter(doc).count()
}

/// Splits a document into its slides.
pub fn extract_slides(doc: &str) -> Vec<Slide> {
    slide_spans(doc)
        .into_iter()
        .map(|sp| Slide {
            html: sp.slice(doc).to_string(),
            start: sp.start,
            end: sp.end,
        })
        .collect()
}

/// The slide containing the byte offset `pos` (both ends inclusive).
pub(crate) fn slide_at_byte(doc: &str, pos: usize) -> Option<Slide> {
    extract_slides(doc)
        .into_iter()
        .find(|s| s.span().contains_inclusive(pos))
}

/// The slide containing a UTF-16 editor cursor, if any.
pub fn find_current_slide(doc: &str, cursor: usize) -> Option<Slide> {
    slide_at_byte(doc, utf16_to_byte(doc, cursor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_has_no_slides() {
        assert_eq!(extract_slides(""), vec![]);
    }

    #[test]
    fn nested_divs_are_depth_counted() {
        let doc = r#"<body><div class="slide"><div class="a"><div>x</div></div><div class="footer">1/1</div></div></body>"#;
        let slides = extract_slides(doc);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].start, 6);
        assert_eq!(&doc[slides[0].end..], "</body>");
        assert!(slides[0].html.ends_with("1/1</div></div>"));
    }

    #[test]
    fn attributes_and_extra_class_tokens_are_accepted() {
        let doc = r#"<div class="slide" id="s1">a</div><div class="slide slide-split">b</div><div class="slide-table-container">c</div>"#;
        let slides = extract_slides(doc);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].html, r#"<div class="slide slide-split">b</div>"#);
    }

    #[test]
    fn unterminated_slide_is_dropped() {
        let doc = r#"<div class="slide">one</div><div class="slide"><div>two</div>"#;
        let slides = extract_slides(doc);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].html, r#"<div class="slide">one</div>"#);
        assert_eq!(count_slide_openings(doc), 2);
    }

    #[test]
    fn slide_nested_in_a_slide_is_not_top_level() {
        let doc = r#"<div class="slide"><div class="slide">inner</div></div>"#;
        let slides = extract_slides(doc);
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].span(), Span::new(0, doc.len()));
    }

    #[test]
    fn current_slide_uses_inclusive_bounds() {
        let doc = r#"xx<div class="slide">a</div>yy<div class="slide">b</div>"#;
        let first = find_current_slide(doc, 2).unwrap();
        assert_eq!(first.html, r#"<div class="slide">a</div>"#);
        assert_eq!(find_current_slide(doc, first.end).unwrap().start, 2);
        assert!(find_current_slide(doc, 0).is_none());
        assert!(find_current_slide(doc, first.end + 1).is_none());
    }

    #[test]
    fn current_slide_converts_utf16_cursor() {
        let doc = "日本語<div class=\"slide\">a</div>";
        // UTF-16 offset 3 is byte offset 9, the slide start
        assert_eq!(find_current_slide(doc, 3).unwrap().start, 9);
        assert!(find_current_slide(doc, 2).is_none());
    }
}
