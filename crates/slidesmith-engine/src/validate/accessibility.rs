use std::sync::LazyLock;

use regex::Regex;

use super::{ErrorCode, Source, ValidationError};

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:color|background-color):\s*#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})").unwrap()
});
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h([1-6])[^>]*>").unwrap());

/// Luminance band (exclusive) treated as poor contrast against both light
/// and dark backgrounds.
const LOW_CONTRAST_BAND: (f64, f64) = (0.4, 0.6);

/// `0.299R + 0.587G + 0.114B`, normalised to 0..=1. `hex` is 3 or 6 digits.
pub fn luminance(hex: &str) -> Option<f64> {
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(f64::from);
    let (r, g, b) = match hex.len() {
        3 => {
            let digit = |i: usize| channel(&hex[i..=i].repeat(2));
            (digit(0)?, digit(1)?, digit(2)?)
        }
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        _ => return None,
    };
    Some((0.299 * r + 0.587 * g + 0.114 * b) / 255.0)
}

pub(super) fn check(src: &Source<'_>) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for caps in COLOR_RE.captures_iter(src.html) {
        let (Some(whole), Some(hex)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Some(lum) = luminance(hex.as_str()) else {
            continue;
        };
        if lum > LOW_CONTRAST_BAND.0 && lum < LOW_CONTRAST_BAND.1 {
            errors.push(ValidationError::new(
                ErrorCode::LowContrast,
                src.line(whole.start()),
                Some(src.column(whole.start())),
                format!("colour #{} may not contrast well with text or background", hex.as_str()),
            ));
        }
    }

    let mut previous: Option<u8> = None;
    for caps in HEADING_RE.captures_iter(src.html) {
        let (Some(whole), Some(level)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let Ok(level) = level.as_str().parse::<u8>() else {
            continue;
        };
        if let Some(prev) = previous
            && level > prev + 1
        {
            errors.push(ValidationError::new(
                ErrorCode::SkippedHeadingLevel,
                src.line(whole.start()),
                None,
                format!(
                    "heading level skipped (h{prev} followed by h{level}); use h{} instead",
                    prev + 1
                ),
            ));
        }
        previous = Some(level);
    }

    errors
}
