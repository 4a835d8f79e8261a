use super::utf16::utf16_len;

/// Maps byte offsets to 1-based line and column numbers.
///
/// Built once per validation run so each diagnostic costs a binary search
/// instead of a rescan of the prefix.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset at which each line starts. Always begins with 0.
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset)
    }

    /// 1-based column of `offset`, counted in UTF-16 code units like an
    /// editor would.
    pub fn column(&self, text: &str, offset: usize) -> usize {
        let line_start = self.starts[self.line(offset) - 1];
        utf16_len(&text[line_start..offset]) + 1
    }

    /// Both coordinates at once.
    pub fn position(&self, text: &str, offset: usize) -> (usize, usize) {
        (self.line(offset), self.column(text, offset))
    }

    /// Byte offset where the 1-based `line` begins, if it exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.starts.get(i)).copied()
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}
