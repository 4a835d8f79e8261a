use std::collections::VecDeque;

/// Most snapshots kept; the oldest are dropped first.
pub const MAX_HISTORY: usize = 50;

/// Linear undo/redo over whole-document snapshots.
///
/// Pushing after an undo discards the redo branch. Grouping rapid edits into
/// one snapshot is up to the caller.
#[derive(Debug, Clone)]
pub struct EditHistory {
    entries: VecDeque<String>,
    index: usize,
}

impl EditHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: VecDeque::from([initial.into()]),
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        self.entries.get(self.index).map_or("", String::as_str)
    }

    /// Records a snapshot. Returns false when it equals the current one.
    pub fn push(&mut self, content: impl Into<String>) -> bool {
        let content = content.into();
        if content == self.current() {
            return false;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push_back(content);
        while self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn undo(&mut self) -> Option<&str> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Starts over from `content` with no undo or redo.
    pub fn reset(&mut self, content: impl Into<String>) {
        self.entries.clear();
        self.entries.push_back(content.into());
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn undo_and_redo_walk_the_snapshots() {
        let mut history = EditHistory::new("a");
        history.push("b");
        history.push("c");

        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some("b"));
        assert!(history.can_redo());
    }

    #[test]
    fn pushing_after_undo_drops_the_redo_branch() {
        let mut history = EditHistory::new("a");
        history.push("b");
        history.undo();
        history.push("x");
        assert!(!history.can_redo());
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn identical_snapshot_is_ignored() {
        let mut history = EditHistory::new("a");
        assert!(!history.push("a"));
        assert!(!history.can_undo());
    }

    #[test]
    fn oldest_entries_fall_off() {
        let mut history = EditHistory::new("0");
        for i in 1..=60 {
            history.push(i.to_string());
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.current(), "60");
        while history.undo().is_some() {}
        assert_eq!(history.current(), "11");
    }

    #[test]
    fn reset_clears_everything() {
        let mut history = EditHistory::new("a");
        history.push("b");
        history.reset("z");
        assert_eq!(history.current(), "z");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
