//! # Text Coordinates
//!
//! The document is a plain `String`; everything else is derived from it on
//! demand. This module holds the small coordinate types shared by the
//! scanner, the deck operations and the validator:
//!
//! - **`span`**: `Span`, a byte range into the document
//! - **`lines`**: `LineIndex`, byte offset to 1-based line/column lookup
//! - **`utf16`**: conversions between byte offsets and the UTF-16 code-unit
//!   offsets editors report for their cursor

pub mod lines;
pub mod span;
pub mod utf16;

pub use lines::LineIndex;
pub use span::Span;
pub use utf16::{byte_to_utf16, utf16_len, utf16_to_byte};
