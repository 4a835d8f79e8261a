use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::escape::{escape_attribute, escape_html};
use super::{FOOTER_BLOCK_RE, Insertion, insert_fragment};
use crate::deck::segment::{SLIDE_OPEN_PATTERN, slide_at_byte};
use crate::images::IMAGES_FOLDER;
use crate::text::{byte_to_utf16, utf16_to_byte};

static WHOLE_SLIDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?s)^{SLIDE_OPEN_PATTERN}(.*)</div>$")).unwrap());
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<h1[^>]*>.*?</h1>").unwrap());
static SPLIT_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<div\s+class="[^"]*\bslide-split\b"#).unwrap());

/// True when the slide's opening tag already carries `slide-split`.
fn is_split_slide(slide_html: &str) -> bool {
    SPLIT_OPEN_RE.is_match(slide_html)
}

/// An image to place in a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// URL or data URI, used when no stored file name is given.
    pub src: String,
    pub alt: String,
    /// Name of the image in the image store; referenced as `images/<name>`.
    pub file_name: Option<String>,
}

impl ImageConfig {
    pub fn resolved_src(&self) -> String {
        match &self.file_name {
            Some(name) => format!("{IMAGES_FOLDER}{name}"),
            None => self.src.clone(),
        }
    }
}

/// A centred image with its alt text shown as a caption.
pub fn generate_image_html(config: &ImageConfig) -> String {
    format!(
        "<div style=\"text-align: center; margin: 30px 0;\">\n    <img src=\"{}\" alt=\"{}\" style=\"max-width: 600px; max-height: 400px; width: auto; height: auto;\">\n    <p style=\"font-size: 16px; color: #7f8c8d; margin-top: 10px; font-style: italic;\">{}</p>\n</div>",
        escape_attribute(&config.resolved_src()),
        escape_attribute(&config.alt),
        escape_html(&config.alt)
    )
}

/// Rewrites one slide into the two-pane layout: title on top, the existing
/// body on the left, the image on the right, footer kept last.
///
/// Input that is not a single whole slide, or is already split, is returned
/// unchanged.
pub fn convert_to_split_layout(slide_html: &str, config: &ImageConfig) -> String {
    if is_split_slide(slide_html) {
        return slide_html.to_string();
    }
    let Some(caps) = WHOLE_SLIDE_RE.captures(slide_html) else {
        return slide_html.to_string();
    };
    let inner = caps.get(1).map_or("", |m| m.as_str());

    let footer = FOOTER_BLOCK_RE.find(inner).map_or("", |m| m.as_str());
    let title = TITLE_RE.find(inner).map_or("", |m| m.as_str());

    let mut body = inner.to_string();
    if !footer.is_empty() {
        body = body.replacen(footer, "", 1);
    }
    if !title.is_empty() {
        body = body.replacen(title, "", 1);
    }

    format!(
        r#"<div class="slide slide-split">
        {title}
        <div class="slide-split-content">
            <div class="slide-content">
{}
            </div>
            <div class="slide-image">
                <img src="{}" alt="{}">
            </div>
        </div>
        {footer}
    </div>"#,
        body.trim(),
        escape_attribute(&config.resolved_src()),
        escape_attribute(&config.alt)
    )
}

/// Inserts an image for a UTF-16 `cursor`. Inside a plain slide the slide is
/// converted to the split layout; a slide that is already split, or a cursor
/// outside every slide, gets the centred image block instead.
pub fn insert_image_to_html(doc: &str, cursor: usize, config: &ImageConfig) -> Insertion {
    let slide = match slide_at_byte(doc, utf16_to_byte(doc, cursor)) {
        Some(slide) if !is_split_slide(&slide.html) => slide,
        _ => return insert_fragment(doc, cursor, &generate_image_html(config)),
    };

    let split = convert_to_split_layout(&slide.html, config);
    let new_content = format!("{}{split}{}", &doc[..slide.start], &doc[slide.end..]);
    Insertion {
        new_cursor_pos: byte_to_utf16(&new_content, slide.start + split.len()),
        new_content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{extract_slides, get_slide_title};
    use insta::assert_snapshot;

    fn stored(name: &str) -> ImageConfig {
        ImageConfig {
            src: String::new(),
            alt: "chart".to_string(),
            file_name: Some(name.to_string()),
        }
    }

    #[test]
    fn split_layout_moves_title_and_footer() {
        let slide = "<div class=\"slide\">\n        <h1>Results</h1>\n        <p>Body</p>\n        <div class=\"footer\">1/1</div>\n    </div>";
        assert_snapshot!(convert_to_split_layout(slide, &stored("image_1_0.png")), @r#"
        <div class="slide slide-split">
                <h1>Results</h1>
                <div class="slide-split-content">
                    <div class="slide-content">
        <p>Body</p>
                    </div>
                    <div class="slide-image">
                        <img src="images/image_1_0.png" alt="chart">
                    </div>
                </div>
                <div class="footer">1/1</div>
            </div>
        "#);
    }

    #[test]
    fn non_slide_input_is_unchanged() {
        let html = "<p>not a slide</p>";
        assert_eq!(convert_to_split_layout(html, &stored("x.png")), html);
    }

    #[test]
    fn inserting_inside_a_slide_replaces_it() {
        let doc = "<body><div class=\"slide\"><h1>A</h1></div><div class=\"slide\"><h1>B</h1></div></body>";
        let ins = insert_image_to_html(doc, 8, &stored("a.png"));
        let slides = extract_slides(&ins.new_content);
        assert_eq!(slides.len(), 2);
        assert!(slides[0].html.starts_with("<div class=\"slide slide-split\">"));
        assert_eq!(get_slide_title(&slides[0].html), "A");
        assert_eq!(ins.new_cursor_pos, slides[0].end);
        assert_eq!(slides[1].html, "<div class=\"slide\"><h1>B</h1></div>");
    }

    #[test]
    fn second_image_in_a_split_slide_is_a_plain_figure() {
        // Given a slide that already took one image
        let doc = "<body><div class=\"slide\"><h1>A</h1><p>Body</p><div class=\"footer\">1/1</div></div></body>";
        let first = insert_image_to_html(doc, 8, &stored("one.png"));

        // When a second image goes into the same slide
        let body_at = first.new_content.find("Body").unwrap();
        let cursor = byte_to_utf16(&first.new_content, body_at);
        let second = insert_image_to_html(&first.new_content, cursor, &stored("two.png"));

        // Then the layout is not split again and the figure sits before the footer
        let slides = extract_slides(&second.new_content);
        assert_eq!(slides.len(), 1);
        let html = &slides[0].html;
        assert_eq!(html.matches("slide-split-content").count(), 1);
        assert_eq!(html.matches("<div class=\"slide slide-split\">").count(), 1);
        assert!(html.contains("<img src=\"images/one.png\" alt=\"chart\">"));
        let figure = html.find("images/two.png").unwrap();
        assert!(figure < html.find("<div class=\"footer\">").unwrap());
        assert!(html.contains("<div style=\"text-align: center; margin: 30px 0;\">"));
    }

    #[test]
    fn split_slides_are_not_converted_again() {
        let split = convert_to_split_layout(
            "<div class=\"slide\"><h1>A</h1><p>x</p></div>",
            &stored("one.png"),
        );
        assert_eq!(convert_to_split_layout(&split, &stored("two.png")), split);
    }

    #[test]
    fn inserting_outside_slides_uses_cursor() {
        let config = ImageConfig {
            src: "https://example.com/a.png".to_string(),
            alt: "A \"quoted\" alt".to_string(),
            file_name: None,
        };
        let ins = insert_image_to_html("<body></body>", 6, &config);
        assert!(ins.new_content.starts_with("<body>\n<div style=\"text-align: center;"));
        assert!(ins.new_content.contains("src=\"https://example.com/a.png\""));
        assert!(ins.new_content.contains("alt=\"A &quot;quoted&quot; alt\""));
        assert!(ins.new_content.ends_with("</div>\n</body>"));
    }
}
