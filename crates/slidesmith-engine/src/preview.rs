//! Self-contained preview documents.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::images::{ImageStore, inline_stored_images};

static STYLESHEET_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*rel=["']stylesheet["'][^>]*href=["'][^"']*slide-styles\.css["'][^>]*>"#)
        .unwrap()
});
static HEAD_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head>").unwrap());

/// Makes `doc` renderable without the deck's folder: the slide stylesheet
/// link is replaced by `css` inline (or `css` is added to the head when
/// there is no link and no `<style>`), and stored images become data URIs.
pub fn process_html_for_preview(doc: &str, css: &str, store: &dyn ImageStore) -> String {
    let trimmed = doc.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let style = format!("<style>{css}</style>");
    let mut html = STYLESHEET_LINK_RE
        .replace_all(trimmed, NoExpand(&style))
        .into_owned();

    if !html.contains("<style>") {
        html = HEAD_CLOSE_RE
            .replace(&html, NoExpand(&format!("{style}</head>")))
            .into_owned();
    }

    inline_stored_images(&html, store)
}
