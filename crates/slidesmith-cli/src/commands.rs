//! One-shot subcommands. Each takes the document text and returns the new
//! text or a report, so `main` only deals with files and printing.

use anyhow::{Context, Result, anyhow, bail};
use slidesmith_engine::deck::templates::{catalogue, new_slide_template, template_by_id};
use slidesmith_engine::fragments::equation::validate_latex;
use slidesmith_engine::fragments::{EquationConfig, TableConfig, insert_equation_to_html, insert_table_to_html};
use slidesmith_engine::text::{LineIndex, byte_to_utf16};
use slidesmith_engine::{
    ElementNode, Slide, Validator, ValidationError, extract_slides, get_slide_title, insert_slide_at,
    parse_html_hierarchy,
};

/// Slide at a 1-based position, as the user counts them.
pub fn slide_by_number(doc: &str, number: usize) -> Result<Slide> {
    let slides = extract_slides(doc);
    let count = slides.len();
    number
        .checked_sub(1)
        .and_then(|i| slides.into_iter().nth(i))
        .ok_or_else(|| anyhow!("slide {number} does not exist (the deck has {count})"))
}

/// A UTF-16 cursor just inside the opening tag of slide `number`.
fn cursor_in_slide(doc: &str, number: usize) -> Result<usize> {
    let slide = slide_by_number(doc, number)?;
    Ok(byte_to_utf16(doc, slide.start + 1))
}

/// Zero-based index for a 1-based slide number that must exist.
pub fn slide_index(doc: &str, number: usize) -> Result<usize> {
    slide_by_number(doc, number)?;
    Ok(number - 1)
}

pub fn list_slides(doc: &str) -> String {
    let lines = LineIndex::new(doc);
    extract_slides(doc)
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            format!(
                "{:>3}  line {:<5} {}\n",
                i + 1,
                lines.line(slide.start),
                get_slide_title(&slide.html)
            )
        })
        .collect()
}

pub fn validation_report(errors: &[ValidationError], json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(errors).context("serialising diagnostics");
    }
    if errors.is_empty() {
        return Ok("no problems found\n".to_string());
    }
    Ok(errors.iter().map(|e| format!("{e}\n")).collect())
}

pub fn validate(doc: &str, validator: &Validator, json: bool) -> Result<(String, bool)> {
    let errors = validator.validate(doc);
    let has_errors = errors
        .iter()
        .any(|e| e.severity == slidesmith_engine::Severity::Error);
    Ok((validation_report(&errors, json)?, has_errors))
}

/// Adds a slide after slide `after` (or after the last slide).
pub fn add_slide(doc: &str, template_id: Option<&str>, after: Option<usize>) -> Result<String> {
    let html = match template_id {
        None => new_slide_template(),
        Some(id) => {
            let template = template_by_id(id).ok_or_else(|| {
                let known: Vec<_> = catalogue().iter().map(|t| t.id).collect();
                anyhow!("unknown template '{id}' (available: {})", known.join(", "))
            })?;
            format!("\n    {}", template.html.trim_start())
        }
    };
    let cursor = match after {
        Some(number) => cursor_in_slide(doc, number)?,
        None => byte_to_utf16(doc, doc.len()),
    };
    Ok(insert_slide_at(doc, &html, cursor).content)
}

pub fn insert_table(doc: &str, slide: usize, config: &TableConfig) -> Result<String> {
    if !(1..=20).contains(&config.rows) || !(1..=10).contains(&config.columns) {
        bail!("tables need 1-20 rows and 1-10 columns");
    }
    let cursor = cursor_in_slide(doc, slide)?;
    Ok(insert_table_to_html(doc, cursor, config).new_content)
}

pub fn insert_equation(doc: &str, slide: usize, config: &EquationConfig) -> Result<String> {
    validate_latex(&config.latex)?;
    let cursor = cursor_in_slide(doc, slide)?;
    Ok(insert_equation_to_html(doc, cursor, config).new_content)
}

pub fn outline(doc: &str) -> String {
    let mut out = String::new();
    for node in parse_html_hierarchy(doc) {
        write_node(&mut out, &node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &ElementNode, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.tag_name);
    if let Some(id) = &node.id {
        out.push_str(&format!("#{id}"));
    }
    if let Some(class) = &node.class_name {
        for c in class.split_whitespace() {
            out.push('.');
            out.push_str(c);
        }
    }
    out.push_str(&format!("  (line {})\n", node.line));
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}
