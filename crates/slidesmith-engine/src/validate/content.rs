use std::sync::LazyLock;

use regex::Regex;

use super::{ErrorCode, Source, ValidationError};
use crate::text::utf16_len;

/// Non-nesting match from a plain slide opening to the first `</div>`
/// after it. Slides that contain their own divs are cut short at the first
/// inner close; the depth-counting segmenter is not used here.
static SLIDE_BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div\s+class="slide"[^>]*>(.*?)</div>"#).unwrap());
static ANY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"font-size:\s*(\d+(?:\.\d+)?)px").unwrap());

/// Longest slide text, in UTF-16 units, before a split is suggested.
pub const MAX_SLIDE_TEXT: usize = 1000;
pub const MIN_FONT_SIZE_PX: f64 = 10.0;
pub const MAX_FONT_SIZE_PX: f64 = 72.0;

pub(super) fn check(src: &Source<'_>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, caps) in SLIDE_BODY_RE.captures_iter(src.html).enumerate() {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let n = index + 1;
        let line = src.line(whole.start());

        let stripped = ANY_TAG_RE.replace_all(body.as_str(), "");
        let text = stripped.trim();
        let length = utf16_len(text);
        if text.is_empty() {
            errors.push(ValidationError::new(
                ErrorCode::EmptySlide,
                line,
                None,
                format!("slide {n}: no content"),
            ));
        }
        if length > MAX_SLIDE_TEXT {
            errors.push(ValidationError::new(
                ErrorCode::TextTooLong,
                line,
                None,
                format!("slide {n}: text is too long ({length} characters); consider splitting the slide"),
            ));
        }

        for font in FONT_SIZE_RE.captures_iter(body.as_str()) {
            let (Some(at), Some(value)) = (font.get(0), font.get(1)) else {
                continue;
            };
            let Ok(size) = value.as_str().parse::<f64>() else {
                continue;
            };
            let font_line = src.line(body.start() + at.start());
            if size < MIN_FONT_SIZE_PX {
                errors.push(ValidationError::new(
                    ErrorCode::FontSizeTooSmall,
                    font_line,
                    None,
                    format!("font size is too small ({size}px) and may be hard to read"),
                ));
            } else if size > MAX_FONT_SIZE_PX {
                errors.push(ValidationError::new(
                    ErrorCode::FontSizeTooLarge,
                    font_line,
                    None,
                    format!("font size is too large ({size}px)"),
                ));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(html: &str) -> Vec<ValidationError> {
        check(&Source::new(html))
    }

    #[test]
    fn empty_slide_after_stripping_tags() {
        let errors = run("<div class=\"slide\">\n  <h1> </h1>\n</div>");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::EmptySlide);
        assert_eq!(errors[0].message, "slide 1: no content");
    }

    #[test]
    fn long_text_is_measured_in_utf16_units() {
        let at_limit = format!("<div class=\"slide\">{}</div>", "あ".repeat(1000));
        assert!(run(&at_limit).is_empty());

        let over = format!("<div class=\"slide\">{}</div>", "😀".repeat(501));
        let errors = run(&over);
        assert_eq!(errors[0].code, ErrorCode::TextTooLong);
        assert!(errors[0].message.contains("(1002 characters)"));
    }

    #[rstest]
    #[case("9px", Some(ErrorCode::FontSizeTooSmall))]
    #[case("9.5px", Some(ErrorCode::FontSizeTooSmall))]
    #[case("10px", None)]
    #[case("72px", None)]
    #[case("72.5px", Some(ErrorCode::FontSizeTooLarge))]
    #[case("2em", None)]
    fn font_size_bounds(#[case] size: &str, #[case] expected: Option<ErrorCode>) {
        let html = format!("<div class=\"slide\"><p style=\"font-size: {size}\">x</p></div>");
        let codes: Vec<ErrorCode> = run(&html).iter().map(|e| e.code).collect();
        assert_eq!(codes, expected.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn font_message_prints_the_number_plainly() {
        let errors = run("<div class=\"slide\">\n<p style=\"font-size:8px\">x</p></div>");
        assert_eq!(errors[0].message, "font size is too small (8px) and may be hard to read");
        assert_eq!(errors[0].line, 2);
    }

    // The greedy match stops at the first inner `</div>`: text after a
    // nested div is not seen, so this slide is reported empty.
    #[test]
    fn nested_div_cuts_the_slide_short() {
        let html = "<div class=\"slide\"><div class=\"footer\"></div><h1>Title</h1></div>";
        let codes: Vec<ErrorCode> = run(html).iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::EmptySlide]);
    }

    #[test]
    fn split_slides_are_not_matched() {
        assert!(run("<div class=\"slide slide-split\"></div>").is_empty());
    }
}
