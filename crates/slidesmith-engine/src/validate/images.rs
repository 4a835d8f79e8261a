use std::sync::LazyLock;

use regex::Regex;

use super::{ErrorCode, Source, ValidationError};
use crate::images::{IMAGES_FOLDER, STORED_IMAGE_PREFIX};

static IMG_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]*src="([^"]*)"[^>]*>"#).unwrap());

fn is_valid_source(src: &str) -> bool {
    ["data:", "http://", "https://", IMAGES_FOLDER, STORED_IMAGE_PREFIX]
        .iter()
        .any(|prefix| src.starts_with(prefix))
}

pub(super) fn check(src: &Source<'_>) -> Vec<ValidationError> {
    IMG_SRC_RE
        .captures_iter(src.html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let path = caps.get(1)?.as_str();
            (!is_valid_source(path)).then(|| {
                ValidationError::new(
                    ErrorCode::InvalidImagePath,
                    src.line(whole.start()),
                    Some(src.column(whole.start())),
                    format!("invalid image path: {path}"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("data:image/png;base64,AAAA", true)]
    #[case("http://example.com/a.png", true)]
    #[case("https://example.com/a.png", true)]
    #[case("images/image_1700000000000_0.png", true)]
    #[case("image_1700000000000_0.png", true)]
    #[case("photos/cat.png", false)]
    #[case("", false)]
    #[case("/abs/path.png", false)]
    fn image_sources(#[case] path: &str, #[case] valid: bool) {
        let html = format!("<img alt=\"a\" src=\"{path}\">");
        let errors = check(&Source::new(&html));
        assert_eq!(errors.is_empty(), valid, "{path}");
    }

    #[test]
    fn reports_position_of_the_tag() {
        let errors = check(&Source::new("<p>\n  <img src=\"x.png\"></p>"));
        assert_eq!(errors[0].line, 2);
        assert_eq!(errors[0].column, Some(3));
        assert_eq!(errors[0].message, "invalid image path: x.png");
    }
}
