use super::{ErrorCode, Source, ValidationError};
use crate::scanner::scan_tags;

struct OpenTag {
    name: String,
    line: usize,
    column: usize,
}

/// Children a parent element may not contain.
fn forbids(parent: &str, child: &str) -> bool {
    match parent {
        "p" => matches!(
            child,
            "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "ul" | "ol" | "table"
        ),
        "a" => child == "a",
        "button" => matches!(child, "a" | "button"),
        _ => false,
    }
}

fn unclosed(tag: &OpenTag) -> ValidationError {
    ValidationError::new(
        ErrorCode::UnclosedTag,
        tag.line,
        Some(tag.column),
        format!("<{}> is never closed", tag.name),
    )
}

/// Tag balance over the scanner's events.
///
/// A closing tag that matches an element deeper in the stack closes that
/// element; everything opened above it is reported unclosed. A closing tag
/// that matches nothing on the stack is a mismatch and pops the top.
pub(super) fn check(src: &Source<'_>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut stack: Vec<OpenTag> = Vec::new();

    for tag in scan_tags(src.html) {
        let line = src.line(tag.start());
        let column = src.column(tag.start());

        if tag.is_closing {
            let Some(top) = stack.last() else {
                errors.push(ValidationError::new(
                    ErrorCode::ClosingTagWithoutOpening,
                    line,
                    Some(column),
                    format!("closing tag </{}> has no matching opening tag", tag.name),
                ));
                continue;
            };

            match stack.iter().rposition(|open| open.name == tag.name) {
                Some(i) => {
                    errors.extend(stack.drain(i + 1..).map(|open| unclosed(&open)));
                    stack.pop();
                }
                None => {
                    errors.push(ValidationError::new(
                        ErrorCode::MismatchedClosingTag,
                        line,
                        Some(column),
                        format!(
                            "<{}> is closed by </{}> (opened on line {})",
                            top.name, tag.name, top.line
                        ),
                    ));
                    stack.pop();
                }
            }
            continue;
        }

        if tag.is_self_closing() {
            continue;
        }

        if let Some(parent) = stack.last()
            && forbids(&parent.name, &tag.name)
        {
            errors.push(ValidationError::new(
                ErrorCode::InvalidNesting,
                line,
                Some(column),
                format!(
                    "<{}> cannot be placed inside <{}> (opened on line {})",
                    tag.name, parent.name, parent.line
                ),
            ));
        }

        stack.push(OpenTag {
            name: tag.name,
            line,
            column,
        });
    }

    errors.extend(stack.iter().map(unclosed));
    errors
}
