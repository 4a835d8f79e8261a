//! # slidesmith engine
//!
//! Editing core for single-file HTML slide decks. Every operation takes the
//! whole document as a string and returns a new one; nothing is parsed into a
//! persistent tree.
//!
//! ## Modules
//!
//! - **`text`**: spans, line tables, UTF-16 offset conversion
//! - **`scanner`**: tag scanning and the element outline
//! - **`deck`**: slide segmentation, reorder/delete/duplicate/insert, page numbers, templates
//! - **`fragments`**: tables, charts, code blocks, equations, images
//! - **`validate`**: diagnostics for structure, classes, content, accessibility
//! - **`style`**: slide sizes and the shipped stylesheet
//! - **`images`**: stored images and base64 externalisation
//! - **`preview`**: self-contained preview documents
//! - **`editing`**: search/replace and undo history
//! - **`io`**: reading and writing deck files

pub mod deck;
pub mod editing;
pub mod fragments;
pub mod images;
pub mod io;
pub mod preview;
pub mod scanner;
pub mod style;
pub mod text;
pub mod validate;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use deck::*;
pub use editing::{EditHistory, TextMatch, find_matches, replace_all, replace_range};
pub use fragments::{Fragment, Insertion, insert_fragment};
pub use io::*;
pub use scanner::hierarchy::{ElementNode, parse_html_hierarchy};
pub use style::{SlideSize, slide_styles_css};
pub use validate::{ErrorCode, Severity, ValidationError, Validator, validate_html};
