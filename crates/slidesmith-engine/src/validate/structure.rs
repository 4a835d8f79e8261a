use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{ErrorCode, Source, ValidationError};
use crate::deck::segment::SLIDE_OPEN_RE;

static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bid="([^"]*)""#).unwrap());
static TAG_BEFORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)[^>]*$").unwrap());
static H1_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h1[^>]*>").unwrap());

/// How far back from an `id=` to look for the owning tag name.
const TAG_LOOKBACK: usize = 50;

fn owning_tag(html: &str, id_at: usize) -> &str {
    let mut from = id_at.saturating_sub(TAG_LOOKBACK);
    while !html.is_char_boundary(from) {
        from += 1;
    }
    TAG_BEFORE_RE
        .captures(&html[from..id_at])
        .and_then(|caps| caps.get(1))
        .map_or("unknown", |m| m.as_str())
}

pub(super) fn check(src: &Source<'_>) -> Vec<ValidationError> {
    let html = src.html;
    let openings: Vec<usize> = SLIDE_OPEN_RE.find_iter(html).map(|m| m.start()).collect();
    if openings.is_empty() {
        return vec![ValidationError::new(
            ErrorCode::NoSlideElements,
            1,
            None,
            "no slide elements (<div class=\"slide\">) found".to_string(),
        )];
    }

    let mut errors = duplicate_ids(src);

    for (i, &start) in openings.iter().enumerate() {
        let end = openings.get(i + 1).copied().unwrap_or(html.len());
        if !H1_OPEN_RE.is_match(&html[start..end]) {
            errors.push(ValidationError::new(
                ErrorCode::MissingSlideTitle,
                src.line(start),
                None,
                format!("slide {}: no title (<h1>) found", i + 1),
            ));
        }
    }

    errors
}

/// Every `id` value used more than once anywhere in the document, reported
/// at its first occurrence.
fn duplicate_ids(src: &Source<'_>) -> Vec<ValidationError> {
    let mut order: Vec<&str> = Vec::new();
    let mut seen: HashMap<&str, Vec<(usize, &str)>> = HashMap::new();

    for caps in ID_RE.captures_iter(src.html) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let occurrence = (src.line(whole.start()), owning_tag(src.html, whole.start()));
        seen.entry(id.as_str())
            .or_insert_with(|| {
                order.push(id.as_str());
                Vec::new()
            })
            .push(occurrence);
    }

    order
        .into_iter()
        .filter_map(|id| {
            let occurrences = seen.get(id).filter(|o| o.len() > 1)?;
            let lines: Vec<String> = occurrences.iter().map(|(l, _)| l.to_string()).collect();
            let mut tags: Vec<&str> = Vec::new();
            for (_, tag) in occurrences {
                if !tags.contains(tag) {
                    tags.push(tag);
                }
            }
            Some(ValidationError::new(
                ErrorCode::DuplicateId,
                occurrences[0].0,
                None,
                format!(
                    "id \"{id}\" is used more than once (lines {}; tags: {})",
                    lines.join(", "),
                    tags.join(", ")
                ),
            ))
        })
        .collect()
}
