//! Undo/redo history management.
//!
//! ## Learning: The Command Pattern
//!
//! Each edit is stored as a record that can be:
//! - Reverted (undo), which yields the opposite record
//! - Re-applied by reverting that opposite record (redo)
//!
//! Records are captured *before* the buffer changes, so a `Change` record
//! holds an owned copy of the line as it was. The live line is then free to
//! be mutated.
//!
//! There is no keystroke coalescing: every recorded edit outside an explicit
//! group is its own undo step.

use std::collections::VecDeque;

use crate::{BufferResult, TextBuffer};

/// The type of edit a record reverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// The line's content was replaced in place
    Change,
    /// A line was inserted at `line`
    InsertLine,
    /// A line was removed from `line`
    RemoveLine,
}

/// A single reversal record.
///
/// ## Learning: Clone vs Copy
///
/// `Edit` implements `Clone` but not `Copy` because it contains
/// a `String`, which owns heap memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// What kind of edit this is
    pub kind: EditKind,
    /// Line index the edit applies to
    pub line: usize,
    /// Prior line content (empty for `InsertLine`)
    pub content: String,
}

impl Edit {
    /// A line about to be changed in place.
    pub fn change(line: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Change,
            line,
            content: content.into(),
        }
    }

    /// A line that was just inserted.
    pub fn insert_line(line: usize) -> Self {
        Self {
            kind: EditKind::InsertLine,
            line,
            content: String::new(),
        }
    }

    /// A line about to be removed.
    pub fn remove_line(line: usize, content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::RemoveLine,
            line,
            content: content.into(),
        }
    }

    /// Reverts this edit on `buffer` and returns the opposite record.
    fn revert(self, buffer: &mut TextBuffer) -> BufferResult<Edit> {
        match self.kind {
            EditKind::Change => {
                let current = buffer.set_line(self.line, self.content)?;
                Ok(Edit::change(self.line, current))
            }
            EditKind::InsertLine => {
                let removed = buffer.delete_line(self.line)?;
                Ok(Edit::remove_line(self.line, removed))
            }
            EditKind::RemoveLine => {
                buffer.insert_line(self.line, self.content)?;
                Ok(Edit::insert_line(self.line))
            }
        }
    }
}

/// A group of edits that are undone/redone together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditGroup {
    /// The edits in recording order
    pub edits: Vec<Edit>,
}

impl EditGroup {
    /// Creates a group holding one edit.
    pub fn new(edit: Edit) -> Self {
        Self { edits: vec![edit] }
    }

    /// Reverts every edit, newest first. Returns the opposite group and the
    /// line touched last.
    fn revert(self, buffer: &mut TextBuffer) -> BufferResult<(EditGroup, Option<usize>)> {
        let mut opposite = Vec::with_capacity(self.edits.len());
        let mut line = None;
        for edit in self.edits.into_iter().rev() {
            line = Some(edit.line);
            opposite.push(edit.revert(buffer)?);
        }
        Ok((EditGroup { edits: opposite }, line))
    }
}

/// Two-stack undo/redo history.
///
/// ## Design Decisions
///
/// 1. **Bounded history**: the oldest groups are dropped past `max_size`
/// 2. **Branch invalidation**: recording a new edit clears the redo stack
/// 3. **Explicit grouping**: multi-line commands wrap their records in
///    `begin_group`/`end_group` so they undo as one step
///
/// ## Learning: VecDeque
///
/// We use `VecDeque` for the undo stack because we need efficient:
/// - Push to back (new edits)
/// - Pop from front (when at capacity)
/// - Pop from back (for undo)
#[derive(Debug, Clone)]
pub struct History {
    /// Stack of undoable edit groups
    undo_stack: VecDeque<EditGroup>,
    /// Stack of redoable edit groups
    redo_stack: Vec<EditGroup>,
    /// Maximum number of edit groups to keep
    max_size: usize,
    /// Group being collected between `begin_group` and `end_group`
    open_group: Option<EditGroup>,
}

impl History {
    /// Creates a new history with the given capacity.
    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_size.min(1024)),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
            open_group: None,
        }
    }

    // ==================== Recording ====================

    /// Records the current content of `line` before it is changed in place.
    pub fn record_change(&mut self, buffer: &TextBuffer, line: usize) -> BufferResult<()> {
        let content = buffer.line(line)?.to_string();
        self.push(Edit::change(line, content));
        Ok(())
    }

    /// Records that a line was inserted at `line`.
    pub fn record_insert(&mut self, line: usize) {
        self.push(Edit::insert_line(line));
    }

    /// Records the content of `line` before it is removed.
    pub fn record_remove(&mut self, buffer: &TextBuffer, line: usize) -> BufferResult<()> {
        let content = buffer.line(line)?.to_string();
        self.push(Edit::remove_line(line, content));
        Ok(())
    }

    /// Pushes an edit onto the history.
    ///
    /// Clears the redo stack: a fresh edit starts a new branch.
    pub fn push(&mut self, edit: Edit) {
        self.redo_stack.clear();

        if let Some(group) = self.open_group.as_mut() {
            group.edits.push(edit);
            return;
        }
        self.push_group(EditGroup::new(edit));
    }

    /// Starts an edit group.
    ///
    /// All edits until `end_group()` will be treated as one undo step.
    pub fn begin_group(&mut self) {
        if self.open_group.is_none() {
            self.open_group = Some(EditGroup::default());
        }
    }

    /// Ends the current edit group. Empty groups are discarded.
    pub fn end_group(&mut self) {
        if let Some(group) = self.open_group.take() {
            if !group.edits.is_empty() {
                self.push_group(group);
            }
        }
    }

    fn push_group(&mut self, group: EditGroup) {
        self.undo_stack.push_back(group);
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.pop_front();
        }
    }

    // ==================== Undo / Redo ====================

    /// Undoes the last edit group.
    ///
    /// Returns the line touched, or `None` when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut TextBuffer) -> BufferResult<Option<usize>> {
        let Some(group) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        let (opposite, line) = group.revert(buffer)?;
        self.redo_stack.push(opposite);
        Ok(line)
    }

    /// Redoes the last undone edit group.
    pub fn redo(&mut self, buffer: &mut TextBuffer) -> BufferResult<Option<usize>> {
        let Some(group) = self.redo_stack.pop() else {
            return Ok(None);
        };
        let (opposite, line) = group.revert(buffer)?;
        self.push_group(opposite);
        Ok(line)
    }

    /// Returns true if there are edits to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are edits to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_group = None;
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns the number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_undo_redo() {
        let mut buffer = TextBuffer::from("abc");
        let mut history = History::new(100);

        history.record_change(&buffer, 0).unwrap();
        buffer.set_line(0, "abcd").unwrap();

        assert_eq!(history.undo(&mut buffer).unwrap(), Some(0));
        assert_eq!(buffer.line(0).unwrap(), "abc");
        assert!(history.can_redo());

        assert_eq!(history.redo(&mut buffer).unwrap(), Some(0));
        assert_eq!(buffer.line(0).unwrap(), "abcd");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_remove_line_undo_restores_structure() {
        let mut buffer = TextBuffer::from("abc\ndef");
        let mut history = History::new(100);

        history.record_remove(&buffer, 0).unwrap();
        buffer.delete_line(0).unwrap();
        assert_eq!(buffer.as_slice(), ["def"]);

        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["abc", "def"]);

        history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["def"]);
    }

    #[test]
    fn test_insert_line_undo() {
        let mut buffer = TextBuffer::from("a");
        let mut history = History::new(100);

        buffer.insert_line(1, "b").unwrap();
        history.record_insert(1);

        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["a"]);
        history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["a", "b"]);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buffer = TextBuffer::from("one");
        let mut history = History::new(100);

        history.record_change(&buffer, 0).unwrap();
        buffer.set_line(0, "two").unwrap();
        history.undo(&mut buffer).unwrap();
        assert!(history.can_redo());

        history.record_change(&buffer, 0).unwrap();
        buffer.set_line(0, "three").unwrap();
        assert!(!history.can_redo());
        assert_eq!(history.redo(&mut buffer).unwrap(), None);
        assert_eq!(buffer.line(0).unwrap(), "three");
    }

    #[test]
    fn test_group_undoes_as_one_step() {
        let mut buffer = TextBuffer::from("foo\nfoo");
        let mut history = History::new(100);

        history.begin_group();
        for line in 0..2 {
            history.record_change(&buffer, line).unwrap();
            buffer.set_line(line, "bar").unwrap();
        }
        history.end_group();
        assert_eq!(history.undo_count(), 1);

        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["foo", "foo"]);
        history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["bar", "bar"]);
    }

    #[test]
    fn test_split_group_round_trip() {
        let mut buffer = TextBuffer::from("hello world");
        let mut history = History::new(100);

        history.begin_group();
        history.record_change(&buffer, 0).unwrap();
        buffer
            .split_line(crate::Position::new(0, 5))
            .unwrap();
        history.record_insert(1);
        history.end_group();

        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["hello world"]);
        history.redo(&mut buffer).unwrap();
        assert_eq!(buffer.as_slice(), ["hello", " world"]);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut buffer = TextBuffer::from("x");
        let mut history = History::new(10);
        assert_eq!(history.undo(&mut buffer).unwrap(), None);
        assert_eq!(history.redo(&mut buffer).unwrap(), None);
        assert_eq!(buffer.line(0).unwrap(), "x");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut buffer = TextBuffer::from("0");
        let mut history = History::new(2);
        for i in 1..=3 {
            history.record_change(&buffer, 0).unwrap();
            buffer.set_line(0, i.to_string()).unwrap();
        }
        assert_eq!(history.undo_count(), 2);
        history.undo(&mut buffer).unwrap();
        history.undo(&mut buffer).unwrap();
        assert_eq!(buffer.line(0).unwrap(), "1");
        assert!(!history.can_undo());
    }
}
