use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use super::{ErrorCode, Source, ValidationError};

static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"class="([^"]*)""#).unwrap());

/// Icon font and utility framework classes that are never reported.
const EXTERNAL_CLASSES: &[&str] = &[
    "fas", "far", "fal", "fab", "fa", "fa-solid", "fa-regular", "fa-light", "fa-brands",
    "container", "container-fluid", "row", "col", "btn", "card", "modal", "navbar", "alert",
    "badge", "dropdown", "nav", "table", "form-control", "form-group", "form-check",
    "input-group", "list-group", "breadcrumb", "pagination", "progress", "spinner", "tooltip",
    "popover", "carousel", "accordion", "offcanvas", "toast", "collapse", "tab", "scrollspy",
];

static EXTERNAL_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // Font Awesome
        r"^fa-",
        r"^fa[a-z]*$",
        // Bootstrap
        r"^col-",
        r"^btn-",
        r"^card-",
        r"^modal-",
        r"^navbar-",
        r"^alert-",
        r"^badge-",
        r"^dropdown-",
        r"^nav-",
        r"^table-",
        r"^form-",
        r"^input-group-",
        r"^list-group-",
        r"^text-",
        r"^bg-",
        r"^border-",
        r"^d-",
        r"^m[xytsb]?-",
        r"^p[xytsb]?-",
        r"^w-",
        r"^h-",
        r"^position-",
        r"^shadow-",
        r"^rounded-",
        r"^g-",
        r"^flex-",
        r"^justify-content-",
        r"^align-items-",
        r"^order-",
        r"^offset-",
        // Tailwind
        r"^(flex|grid|hidden|block|inline|inline-block|absolute|relative|fixed|sticky)$",
        r"^(text|bg|border|ring|divide|outline|placeholder|from|via|to)-",
        r"^(m|p|space|gap|w|h|max-w|max-h|min-w|min-h|top|right|bottom|left|inset)-",
        r"^(rounded|shadow|opacity|z|order|col-span|row-span|grid-cols|grid-rows)-",
        r"^(flex|grid|items|justify|content|self|place|gap|space)-",
        r"^(font|text|leading|tracking|align|whitespace|break|overflow|truncate)-",
        r"^(bg|from|via|to|decoration|underline|accent|caret|fill|stroke)-",
        r"^(transition|duration|ease|delay|animate)-",
        r"^(transform|scale|rotate|translate|skew|origin)-",
        r"^(cursor|select|resize|appearance|pointer-events)-",
        r"^(object|overflow|overscroll|position|inset|z)-",
        r"^(visible|invisible|sr-only|not-sr-only)$",
        // Prism
        r"^language-",
    ])
    .unwrap()
});

/// Largest edit distance still offered as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 2;

fn is_external(class: &str) -> bool {
    EXTERNAL_CLASSES.contains(&class) || EXTERNAL_PATTERNS.is_match(class)
}

/// Edit distance between two strings, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut row = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            row[j + 1] = if ca == *cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(row[j])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[b.len()]
}

/// Closest defined class within the suggestion distance. The first class at
/// the smallest distance wins.
fn closest<'a>(target: &str, defined: &'a [String]) -> Option<&'a str> {
    let target_len = target.chars().count();
    let mut best: Option<(usize, &str)> = None;
    for class in defined {
        if class.chars().count().abs_diff(target_len) > MAX_SUGGESTION_DISTANCE {
            continue;
        }
        let d = levenshtein(target, class);
        if d <= MAX_SUGGESTION_DISTANCE && best.is_none_or(|(min, _)| d < min) {
            best = Some((d, class));
        }
    }
    best.map(|(_, class)| class)
}

pub(super) fn check(
    src: &Source<'_>,
    ordered: &[String],
    defined: &HashSet<String>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for caps in CLASS_ATTR_RE.captures_iter(src.html) {
        let (Some(whole), Some(list)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let line = src.line(whole.start());
        let column = src.column(whole.start());

        for class in list.as_str().split_whitespace() {
            if is_external(class) || defined.contains(class) {
                continue;
            }
            let message = match closest(class, ordered) {
                Some(suggestion) => {
                    format!("class \"{class}\" is not defined; did you mean \"{suggestion}\"?")
                }
                None => format!("class \"{class}\" is not defined"),
            };
            errors.push(ValidationError::new(
                ErrorCode::UndefinedCssClass,
                line,
                Some(column),
                message,
            ));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn classes(list: &[&str]) -> (Vec<String>, HashSet<String>) {
        let ordered: Vec<String> = list.iter().map(|s| s.to_string()).collect();
        let set = ordered.iter().cloned().collect();
        (ordered, set)
    }

    fn messages(html: &str, defined: &[&str]) -> Vec<String> {
        let (ordered, set) = classes(defined);
        check(&Source::new(html), &ordered, &set)
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[rstest]
    #[case("", "", 0)]
    #[case("abc", "", 3)]
    #[case("kitten", "sitting", 3)]
    #[case("slide", "slid", 1)]
    #[case("hilight", "highlight", 2)]
    #[case("日本", "日本語", 1)]
    fn edit_distance(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(levenshtein(a, b), expected);
        assert_eq!(levenshtein(b, a), expected);
    }

    #[test]
    fn suggests_close_defined_class() {
        assert_eq!(
            messages(r#"<p class="hilight">x</p>"#, &["slide", "highlight"]),
            vec![r#"class "hilight" is not defined; did you mean "highlight"?"#]
        );
    }

    #[test]
    fn first_class_wins_a_tie() {
        assert_eq!(
            messages(r#"<p class="cat">x</p>"#, &["bat", "car"]),
            vec![r#"class "cat" is not defined; did you mean "bat"?"#]
        );
    }

    #[test]
    fn far_away_classes_get_no_suggestion() {
        assert_eq!(
            messages(r#"<p class="zzzzzz">x</p>"#, &["slide"]),
            vec![r#"class "zzzzzz" is not defined"#]
        );
    }

    #[rstest]
    #[case("fa-chart-line")]
    #[case("fas")]
    #[case("col-md-6")]
    #[case("btn-primary")]
    #[case("mt-3")]
    #[case("px-2")]
    #[case("text-red-500")]
    #[case("items-center")]
    #[case("sr-only")]
    #[case("container")]
    #[case("inline-block")]
    #[case("language-rust")]
    fn external_classes_are_ignored(#[case] class: &str) {
        assert!(messages(&format!(r#"<i class="{class}"></i>"#), &[]).is_empty());
    }

    #[test]
    fn every_token_is_checked() {
        let html = "<div class=\"slide  bogus\n other\">";
        let errors = messages(html, &["slide"]);
        assert_eq!(errors.len(), 2);
    }
}
