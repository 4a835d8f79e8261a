//! Footer page numbering.

use std::sync::LazyLock;

use chrono::{Datelike, Local};
use regex::{Captures, Regex};

use super::segment::count_slide_openings;

/// Footer text that is replaced wholesale with `{date} - スライド n/m`.
pub const PAGE_NUMBER_PLACEHOLDER: &str = "PAGE_NUMBER_PLACEHOLDER";

static FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div class="footer">\s*([^<]*?)\s*</div>"#).unwrap());
static PAGE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+/[0-9]+").unwrap());
static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4}年[0-9]+月)").unwrap());

/// `YYYY年M月` for the local date.
pub fn current_month_label() -> String {
    let now = Local::now();
    format!("{}年{}月", now.year(), now.month())
}

/// Renumbers every footer using today's month for placeholder footers.
pub fn update_page_numbers(doc: &str) -> String {
    update_page_numbers_with_date(doc, &current_month_label())
}

/// Renumbers every footer in document order.
///
/// The total is the number of slide openings. Each footer gets the next
/// number: a placeholder footer becomes `{date_label} - スライド n/m`, an
/// existing `N/M` is replaced, and a bare `YYYY年M月` gets the page suffix.
/// Footers matching none of these keep their text but still consume a
/// number.
pub fn update_page_numbers_with_date(doc: &str, date_label: &str) -> String {
    let total = count_slide_openings(doc);
    let mut current = 0usize;

    FOOTER_RE
        .replace_all(doc, |caps: &Captures| {
            current += 1;
            let page = format!("{current}/{total}");
            let content = caps[1].trim();

            let footer = if content.contains(PAGE_NUMBER_PLACEHOLDER) {
                format!("{date_label} - スライド {page}")
            } else if PAGE_NUMBER_RE.is_match(content) {
                PAGE_NUMBER_RE.replace(content, page.as_str()).into_owned()
            } else {
                MONTH_RE
                    .replace(content, format!("$1 - スライド {page}").as_str())
                    .into_owned()
            };
            format!("<div class=\"footer\">\n            {footer}\n        </div>")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn one_slide(footer: &str) -> String {
        format!("<div class=\"slide\"><div class=\"footer\">{footer}</div></div>")
    }

    #[rstest]
    #[case::placeholder("PAGE_NUMBER_PLACEHOLDER", "2030年1月 - スライド 1/1")]
    #[case::existing_number("2025年9月 - スライド 4/7", "2025年9月 - スライド 1/1")]
    #[case::month_only("2025年9月", "2025年9月 - スライド 1/1")]
    #[case::nothing_to_number("Company name", "Company name")]
    fn footer_rewrites(#[case] footer: &str, #[case] expected: &str) {
        let out = update_page_numbers_with_date(&one_slide(footer), "2030年1月");
        assert_eq!(
            out,
            format!(
                "<div class=\"slide\"><div class=\"footer\">\n            {expected}\n        </div></div>"
            )
        );
    }

    #[test]
    fn numbers_follow_document_order() {
        let doc = [
            one_slide("x 9/9"),
            one_slide("PAGE_NUMBER_PLACEHOLDER"),
            one_slide("x 1/1"),
        ]
        .join("\n");
        let out = update_page_numbers_with_date(&doc, "2030年1月");
        let pages: Vec<_> = PAGE_NUMBER_RE.find_iter(&out).map(|m| m.as_str()).collect();
        assert_eq!(pages, vec!["1/3", "2/3", "3/3"]);
    }

    #[test]
    fn total_counts_split_slides() {
        let doc = format!(
            "{}<div class=\"slide slide-split\"><div class=\"footer\">1/1</div></div>",
            one_slide("1/1")
        );
        let out = update_page_numbers_with_date(&doc, "2030年1月");
        assert!(out.contains("1/2"));
        assert!(out.contains("2/2"));
    }

    #[test]
    fn document_without_footers_is_unchanged() {
        let doc = "<div class=\"slide\"><h1>x</h1></div>";
        assert_eq!(update_page_numbers_with_date(doc, "2030年1月"), doc);
    }

    #[test]
    fn month_label_has_expected_shape() {
        assert!(MONTH_RE.is_match(&current_month_label()));
    }
}
