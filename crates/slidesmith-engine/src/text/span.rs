/// A byte range `[start, end)` into the document string.
///
/// Spans are only valid for the exact string they were computed from; any
/// edit invalidates them and they must be recomputed by re-scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Inclusive containment: a cursor sitting right after the closing
    /// tag still belongs to the span.
    #[must_use]
    pub fn contains_inclusive(self, pos: usize) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Slices `text` with this span.
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}
