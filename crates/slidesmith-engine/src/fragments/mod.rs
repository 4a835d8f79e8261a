//! # Fragment Generators
//!
//! Pure string templates for the elements a user can insert into a slide,
//! and the shared placement rule that splices them into a document.
//!
//! ## Modules
//!
//! - **`escape`**: content and attribute escapers
//! - **`table`**, **`chart`**, **`code_block`**, **`equation`**, **`image`**:
//!   one config type and one generator each
//!
//! Class names emitted here are matched by the shipped stylesheet and by
//! client-side renderers, so they are part of the output format.

pub mod chart;
pub mod code_block;
pub mod equation;
pub mod escape;
pub mod image;
pub mod table;

use std::sync::LazyLock;

use regex::Regex;

use crate::deck::segment::slide_at_byte;
use crate::text::{byte_to_utf16, utf16_to_byte};

pub use chart::{
    ChartConfig, ChartData, ChartDataset, ChartType, generate_chart_html, generate_chart_html_with_id,
};
pub use code_block::{CodeBlockConfig, CodeBlockStyle, generate_code_block_html};
pub use equation::{
    EquationAlignment, EquationConfig, EquationDisplay, LatexError, generate_equation_html,
    validate_latex,
};
pub use escape::{escape_attribute, escape_html};
pub use image::{ImageConfig, convert_to_split_layout, generate_image_html, insert_image_to_html};
pub use table::{TableConfig, TableStyle, generate_table_html};

/// Error for style names that do not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

pub(crate) static FOOTER_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<div class="footer">.*?</div>"#).unwrap());

const FOOTER_PAD: &str = "\n        ";
const CLOSING_PAD: &str = "\n    ";
const LOOSE_PAD: &str = "\n";

/// Document after an insertion, with the editor cursor to restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    pub new_content: String,
    /// UTF-16 offset just past the inserted text, padding included.
    pub new_cursor_pos: usize,
}

/// Splices `fragment` into `doc` for an editor cursor at UTF-16 `cursor`.
///
/// Inside a slide the fragment goes before the slide's footer, or before
/// the slide's closing `</div>` when there is no footer. Outside every slide
/// it goes at the cursor itself.
pub fn insert_fragment(doc: &str, cursor: usize, fragment: &str) -> Insertion {
    let pos = utf16_to_byte(doc, cursor);

    let (at, pad) = match slide_at_byte(doc, pos) {
        Some(slide) => match FOOTER_BLOCK_RE.find(&slide.html) {
            Some(footer) => (slide.start + footer.start(), FOOTER_PAD),
            None => (slide.end - "</div>".len(), CLOSING_PAD),
        },
        None => (pos, LOOSE_PAD),
    };

    let inserted = format!("{pad}{fragment}{pad}");
    let mut new_content = String::with_capacity(doc.len() + inserted.len());
    new_content.push_str(&doc[..at]);
    new_content.push_str(&inserted);
    new_content.push_str(&doc[at..]);

    Insertion {
        new_cursor_pos: byte_to_utf16(&new_content, at + inserted.len()),
        new_content,
    }
}

pub fn insert_table_to_html(doc: &str, cursor: usize, config: &TableConfig) -> Insertion {
    insert_fragment(doc, cursor, &generate_table_html(config))
}

pub fn insert_chart_to_html(doc: &str, cursor: usize, config: &ChartConfig) -> Insertion {
    insert_fragment(doc, cursor, &generate_chart_html(config))
}

pub fn insert_code_block_to_html(doc: &str, cursor: usize, config: &CodeBlockConfig) -> Insertion {
    insert_fragment(doc, cursor, &generate_code_block_html(config))
}

/// Inline and block equations share the slide placement rule.
pub fn insert_equation_to_html(doc: &str, cursor: usize, config: &EquationConfig) -> Insertion {
    insert_fragment(doc, cursor, &generate_equation_html(config))
}

/// Any insertable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Table(TableConfig),
    Chart(ChartConfig),
    CodeBlock(CodeBlockConfig),
    Equation(EquationConfig),
    Image(ImageConfig),
}

impl Fragment {
    pub fn to_html(&self) -> String {
        match self {
            Fragment::Table(c) => generate_table_html(c),
            Fragment::Chart(c) => generate_chart_html(c),
            Fragment::CodeBlock(c) => generate_code_block_html(c),
            Fragment::Equation(c) => generate_equation_html(c),
            Fragment::Image(c) => generate_image_html(c),
        }
    }

    /// Inserts this fragment. Images convert the enclosing slide to the
    /// split layout instead of using the footer rule.
    pub fn insert_into(&self, doc: &str, cursor: usize) -> Insertion {
        match self {
            Fragment::Image(c) => insert_image_to_html(doc, cursor, c),
            other => insert_fragment(doc, cursor, &other.to_html()),
        }
    }
}
