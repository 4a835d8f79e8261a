//! # HTML Structural Validator
//!
//! Six independent passes over the raw document string, each producing its
//! own diagnostics; results are merged and stably sorted by line.
//!
//! ## Passes
//!
//! - **`syntax`**: open/close tag balance and illegal nesting
//! - **`structure`**: slide presence, duplicate ids, slide titles
//! - **`images`**: image source paths
//! - **`css`**: class names against the stylesheet, with suggestions
//! - **`content`**: empty slides, long text, extreme font sizes
//! - **`accessibility`**: mid-luminance colours, skipped heading levels
//!
//! Malformed input never fails validation; it only produces diagnostics.

mod accessibility;
mod content;
mod css;
mod images;
mod structure;
mod syntax;

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use log::trace;
use serde::Serialize;

use crate::style::{SlideSize, extract_css_classes, slide_styles_css};
use crate::text::LineIndex;

pub use css::levenshtein;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ClosingTagWithoutOpening,
    MismatchedClosingTag,
    InvalidNesting,
    UnclosedTag,
    NoSlideElements,
    DuplicateId,
    MissingSlideTitle,
    InvalidImagePath,
    UndefinedCssClass,
    EmptySlide,
    TextTooLong,
    FontSizeTooSmall,
    FontSizeTooLarge,
    LowContrast,
    SkippedHeadingLevel,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ClosingTagWithoutOpening => "CLOSING_TAG_WITHOUT_OPENING",
            ErrorCode::MismatchedClosingTag => "MISMATCHED_CLOSING_TAG",
            ErrorCode::InvalidNesting => "INVALID_NESTING",
            ErrorCode::UnclosedTag => "UNCLOSED_TAG",
            ErrorCode::NoSlideElements => "NO_SLIDE_ELEMENTS",
            ErrorCode::DuplicateId => "DUPLICATE_ID",
            ErrorCode::MissingSlideTitle => "MISSING_SLIDE_TITLE",
            ErrorCode::InvalidImagePath => "INVALID_IMAGE_PATH",
            ErrorCode::UndefinedCssClass => "UNDEFINED_CSS_CLASS",
            ErrorCode::EmptySlide => "EMPTY_SLIDE",
            ErrorCode::TextTooLong => "TEXT_TOO_LONG",
            ErrorCode::FontSizeTooSmall => "FONT_SIZE_TOO_SMALL",
            ErrorCode::FontSizeTooLarge => "FONT_SIZE_TOO_LARGE",
            ErrorCode::LowContrast => "LOW_CONTRAST",
            ErrorCode::SkippedHeadingLevel => "SKIPPED_HEADING_LEVEL",
        }
    }

    /// Tag structure problems are errors; quality hints are warnings.
    pub fn severity(self) -> Severity {
        match self {
            ErrorCode::ClosingTagWithoutOpening
            | ErrorCode::MismatchedClosingTag
            | ErrorCode::InvalidNesting
            | ErrorCode::UnclosedTag
            | ErrorCode::NoSlideElements
            | ErrorCode::DuplicateId
            | ErrorCode::InvalidImagePath => Severity::Error,
            ErrorCode::MissingSlideTitle
            | ErrorCode::UndefinedCssClass
            | ErrorCode::EmptySlide
            | ErrorCode::TextTooLong
            | ErrorCode::FontSizeTooSmall
            | ErrorCode::FontSizeTooLarge
            | ErrorCode::LowContrast
            | ErrorCode::SkippedHeadingLevel => Severity::Warning,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One diagnostic. `line` and `column` are 1-based; columns count UTF-16
/// code units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    pub code: ErrorCode,
}

impl ValidationError {
    pub fn new(code: ErrorCode, line: usize, column: Option<usize>, message: String) -> Self {
        Self {
            line,
            column,
            severity: code.severity(),
            message,
            code,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match self.column {
            Some(col) => write!(f, "{}:{col}: {severity} [{}] {}", self.line, self.code, self.message),
            None => write!(f, "{}: {severity} [{}] {}", self.line, self.code, self.message),
        }
    }
}

/// The document plus its line table, shared by every pass.
pub(crate) struct Source<'a> {
    pub html: &'a str,
    lines: LineIndex,
}

impl<'a> Source<'a> {
    fn new(html: &'a str) -> Self {
        Self {
            html,
            lines: LineIndex::new(html),
        }
    }

    pub fn line(&self, offset: usize) -> usize {
        self.lines.line(offset)
    }

    pub fn column(&self, offset: usize) -> usize {
        self.lines.column(self.html, offset)
    }
}

/// Validates documents against a fixed set of defined CSS classes.
#[derive(Debug, Clone)]
pub struct Validator {
    /// Defined classes in stylesheet order; suggestions prefer earlier ones.
    ordered: Vec<String>,
    defined: HashSet<String>,
}

impl Validator {
    pub fn new<I, S>(defined_classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut validator = Self {
            ordered: Vec::new(),
            defined: HashSet::new(),
        };
        validator.add_classes(defined_classes);
        validator
    }

    /// Builds a validator whose defined classes are those of `css`.
    pub fn with_stylesheet(css: &str) -> Self {
        Self::new(extract_css_classes(css))
    }

    /// Adds more defined classes, e.g. from a user stylesheet.
    pub fn with_extra_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_classes(classes);
        self
    }

    fn add_classes<I, S>(&mut self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            let class = class.into();
            if self.defined.insert(class.clone()) {
                self.ordered.push(class);
            }
        }
    }

    pub fn defines(&self, class: &str) -> bool {
        self.defined.contains(class)
    }

    pub fn validate(&self, html: &str) -> Vec<ValidationError> {
        let source = Source::new(html);
        let mut errors = Vec::new();

        let passes: [(&str, Vec<ValidationError>); 6] = [
            ("syntax", syntax::check(&source)),
            ("structure", structure::check(&source)),
            ("images", images::check(&source)),
            ("css", css::check(&source, &self.ordered, &self.defined)),
            ("content", content::check(&source)),
            ("accessibility", accessibility::check(&source)),
        ];
        for (name, found) in passes {
            trace!("{name} pass: {} diagnostics", found.len());
            errors.extend(found);
        }

        errors.sort_by_key(|e| e.line);
        errors
    }
}

static DEFAULT_VALIDATOR: LazyLock<Validator> =
    LazyLock::new(|| Validator::with_stylesheet(&slide_styles_css(SlideSize::default())));

/// Validates against the shipped stylesheet.
pub fn validate_html(html: &str) -> Vec<ValidationError> {
    DEFAULT_VALIDATOR.validate(html)
}
