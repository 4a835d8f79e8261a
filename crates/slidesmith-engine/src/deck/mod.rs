//! # Slide Document Model
//!
//! A deck is one HTML string. Slides are the top-level
//! `<div class="slide">…</div>` regions inside it, found by depth-counting
//! `<div`/`</div>` pairs rather than by regex alone, because slides nest
//! their own divs (footers, layout containers, fragments).
//!
//! Nothing is cached between calls: every operation re-segments the string
//! it is given and returns a freshly built string. Slide offsets are only
//! meaningful for the exact string they came from.
//!
//! ## Modules
//!
//! - **`segment`**: `extract_slides`, `find_current_slide`, the depth counter
//! - **`ops`**: reorder / delete / duplicate / insert, slide titles
//! - **`paging`**: footer page-number renumbering
//! - **`templates`**: starter document and slide templates

pub mod ops;
pub mod paging;
pub mod segment;
pub mod templates;

pub use ops::{
    SLIDE_SEPARATOR, SlideInsertion, UNTITLED_SLIDE, delete_slide, duplicate_slide,
    find_slide_insert_position, get_slide_title, insert_slide_at, reorder_slides,
};
pub use paging::{PAGE_NUMBER_PLACEHOLDER, update_page_numbers, update_page_numbers_with_date};
pub use segment::{Slide, extract_slides, find_current_slide};
pub use templates::{SlideTemplate, TemplateCategory};

/// HTML of the slide at `index`, or an empty string when out of range.
pub fn slide_html_at(doc: &str, index: usize) -> String {
    extract_slides(doc)
        .into_iter()
        .nth(index)
        .map(|s| s.html)
        .unwrap_or_default()
}

/// Wraps a single slide into a standalone document, as used when one slide
/// is shown on its own in presentation mode.
pub fn wrap_slide_document(slide_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>プレゼンテーション</title>
</head>
<body>
  {slide_html}
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_html_at_returns_one_slide() {
        let doc = templates::default_document();
        let second = slide_html_at(&doc, 1);
        assert!(second.starts_with("<div class=\"slide\">"));
        assert!(second.contains("主要なポイント"));
        assert_eq!(slide_html_at(&doc, 3), "");
    }

    #[test]
    fn wrapped_slide_is_a_one_slide_deck() {
        let doc = templates::default_document();
        let wrapped = wrap_slide_document(&slide_html_at(&doc, 0));
        assert!(wrapped.starts_with("<!DOCTYPE html>"));
        let slides = extract_slides(&wrapped);
        assert_eq!(slides.len(), 1);
        assert_eq!(get_slide_title(&slides[0].html), "プレゼンテーションタイトル");
    }
}
