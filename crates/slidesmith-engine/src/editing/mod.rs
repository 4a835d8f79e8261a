//! Editor-side helpers that work on the document string: literal
//! search/replace with UTF-16 match ranges, and a bounded undo history.

pub mod history;
pub mod search;

pub use history::{EditHistory, MAX_HISTORY};
pub use search::{TextMatch, find_matches, replace_all, replace_range};
