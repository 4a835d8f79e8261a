//! Whole-document slide operations.
//!
//! Each operation re-segments the input, rebuilds the slide run from the
//! original text before the first slide, the slides joined by
//! [`SLIDE_SEPARATOR`], and the original text after the last slide, then
//! renumbers footers. Whatever sat between two slides (comments, blank
//! lines) is replaced by the separator. Invalid indices are a no-op: the
//! input comes back unchanged, since a live editor routinely asks with a
//! stale index while re-rendering.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::paging::update_page_numbers;
use super::segment::{Slide, extract_slides, slide_spans};
use crate::text::{byte_to_utf16, utf16_to_byte};

/// Literal text placed between slides when a deck is rebuilt.
pub const SLIDE_SEPARATOR: &str = "\n\n    ";

/// Title returned for a slide without an `<h1>`.
pub const UNTITLED_SLIDE: &str = "Untitled";

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").unwrap());
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Rebuilds `doc` with `slides` (already reordered/filtered) in place of the
/// original slide run.
fn rebuild(doc: &str, original: &[Slide], slides: &[&str]) -> String {
    let (Some(first), Some(last)) = (original.first(), original.last()) else {
        return doc.to_string();
    };
    let before = &doc[..first.start];
    let after = &doc[last.end..];
    if slides.is_empty() {
        return format!("{before}{after}");
    }
    let joined = slides.join(SLIDE_SEPARATOR);
    update_page_numbers(&format!("{before}{joined}{after}"))
}

/// Moves the slide at `from` so that it ends up at index `to`.
pub fn reorder_slides(doc: &str, from: usize, to: usize) -> String {
    let slides = extract_slides(doc);
    if from >= slides.len() || to >= slides.len() {
        debug!(
            "reorder {from} -> {to} ignored: deck has {} slides",
            slides.len()
        );
        return doc.to_string();
    }

    let mut order: Vec<&str> = slides.iter().map(|s| s.html.as_str()).collect();
    let moved = order.remove(from);
    order.insert(to, moved);
    rebuild(doc, &slides, &order)
}

/// Removes the slide at `index`.
///
/// Removing the only slide leaves the surrounding document text with no
/// slides and no renumbering.
pub fn delete_slide(doc: &str, index: usize) -> String {
    let slides = extract_slides(doc);
    if index >= slides.len() {
        debug!(
            "delete {index} ignored: deck has {} slides",
            slides.len()
        );
        return doc.to_string();
    }

    let kept: Vec<&str> = slides
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, s)| s.html.as_str())
        .collect();
    rebuild(doc, &slides, &kept)
}

/// Inserts a copy of the slide at `index` directly after it.
pub fn duplicate_slide(doc: &str, index: usize) -> String {
    let slides = extract_slides(doc);
    if index >= slides.len() {
        debug!(
            "duplicate {index} ignored: deck has {} slides",
            slides.len()
        );
        return doc.to_string();
    }

    let mut order: Vec<&str> = slides.iter().map(|s| s.html.as_str()).collect();
    order.insert(index + 1, slides[index].html.as_str());
    rebuild(doc, &slides, &order)
}

/// Byte offset at which a new slide goes for a cursor at byte `pos`: after
/// the slide containing the cursor, else after the last slide, else at the
/// end of the document.
fn insert_position_bytes(doc: &str, pos: usize) -> usize {
    let spans = slide_spans(doc);
    spans
        .iter()
        .find(|sp| sp.contains_inclusive(pos))
        .or(spans.last())
        .map_or(doc.len(), |sp| sp.end)
}

/// Where a new slide would be inserted for a UTF-16 `cursor`, as a UTF-16
/// offset.
pub fn find_slide_insert_position(doc: &str, cursor: usize) -> usize {
    let at = insert_position_bytes(doc, utf16_to_byte(doc, cursor));
    byte_to_utf16(doc, at)
}

/// Result of inserting a slide: the renumbered document and the cursor to
/// place in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideInsertion {
    pub content: String,
    /// UTF-16 offset right after the new slide's first `</h1>`, or the new
    /// slide's start when it has no title.
    pub cursor: usize,
}

/// Inserts `template` at the slide insertion point for `cursor` and
/// renumbers the deck.
pub fn insert_slide_at(doc: &str, template: &str, cursor: usize) -> SlideInsertion {
    let at = insert_position_bytes(doc, utf16_to_byte(doc, cursor));
    let mut spliced = String::with_capacity(doc.len() + template.len());
    spliced.push_str(&doc[..at]);
    spliced.push_str(template);
    spliced.push_str(&doc[at..]);
    let content = update_page_numbers(&spliced);

    // Renumbering can change footer lengths before the new slide, so find
    // it again by index instead of shifting offsets.
    let index = slide_spans(doc).iter().filter(|sp| sp.end <= at).count();
    let new_cursor = slide_spans(&content)
        .get(index)
        .map(|sp| {
            let html = sp.slice(&content);
            match html.find("</h1>") {
                Some(i) => sp.start + i + "</h1>".len(),
                None => sp.start,
            }
        })
        .unwrap_or(content.len());

    SlideInsertion {
        cursor: byte_to_utf16(&content, new_cursor),
        content,
    }
}

/// Text of the slide's first `<h1>`, inner tags stripped and trimmed.
pub fn get_slide_title(slide_html: &str) -> String {
    H1_RE
        .captures(slide_html)
        .map(|caps| ANY_TAG_RE.replace_all(&caps[1], "").trim().to_string())
        .unwrap_or_else(|| UNTITLED_SLIDE.to_string())
}
