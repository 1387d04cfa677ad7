//! The edited document: buffer, cursor and history as one unit.
//!
//! ## Learning: Composition over Inheritance
//!
//! Rust doesn't have inheritance. `Document` composes a `TextBuffer`, a
//! cursor `Position` and a `History`, and every edit goes through a method
//! here so the three can never drift apart:
//!
//! 1. record the reversal in `History`
//! 2. mutate the `TextBuffer`
//! 3. re-clamp the cursor
//!
//! Methods return [`BufferResult`]; callers in the editor turn failures
//! into status text.

use std::path::{Path, PathBuf};

use vix_buffer::{
    Boundary, BufferResult, History, Position, TextBuffer, clamp, next_word_boundary,
    previous_word_boundary,
};

/// A single buffer being edited.
pub struct Document {
    /// The underlying text buffer
    buffer: TextBuffer,

    /// Cursor position, always clamped to `buffer`
    cursor: Position,

    /// Undo/redo history
    history: History,

    /// File path (None for untitled documents)
    path: Option<PathBuf>,

    /// Display name
    name: String,

    /// File extension used to pick keywords
    extension: Option<String>,

    /// Whether the buffer differs from the last save
    modified: bool,
}

impl Document {
    /// Creates an untitled document holding one empty line.
    pub fn new(undo_limit: usize) -> Self {
        Self::from_lines(Vec::new(), undo_limit)
    }

    /// Creates an untitled document from lines.
    pub fn from_lines(lines: Vec<String>, undo_limit: usize) -> Self {
        Self {
            buffer: TextBuffer::from(lines),
            cursor: Position::ZERO,
            history: History::new(undo_limit),
            path: None,
            name: "[No Name]".to_string(),
            extension: None,
            modified: false,
        }
    }

    /// Creates a document bound to `path` with the given content.
    pub fn open(path: impl Into<PathBuf>, lines: Vec<String>, undo_limit: usize) -> Self {
        let mut doc = Self::from_lines(lines, undo_limit);
        doc.set_path(path);
        doc
    }

    // ==================== State ====================

    /// Returns the text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns the history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the file path.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file extension, if any.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Returns true if the document has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the line count.
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Binds the document to a new path.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned());
        self.path = Some(path);
    }

    /// Marks the document as saved.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    // ==================== Motions ====================

    /// Moves the cursor by `(dx, dy)`, clamped.
    pub fn move_by(&mut self, dx: isize, dy: isize) {
        self.cursor = self.cursor.move_by(&self.buffer, dx, dy);
    }

    /// Moves the cursor to a position, clamped.
    pub fn move_to(&mut self, pos: Position) {
        self.cursor = clamp(&self.buffer, pos);
    }

    /// Moves to the start of the next word, crossing to the next line when
    /// the scan reaches the end of the current one.
    pub fn word_forward(&mut self) -> BufferResult<()> {
        let Position { line, column } = self.cursor;
        let text = self.buffer.line(line)?;

        self.cursor = match next_word_boundary(text, column) {
            Boundary::Column(column) => Position::new(line, column),
            Boundary::EndOfLine if line + 1 < self.buffer.len_lines() => {
                Position::new(line + 1, 0)
            }
            Boundary::EndOfLine => Position::new(line, text.chars().count()),
        };
        Ok(())
    }

    /// Moves to the start of the previous word on the current line.
    pub fn word_backward(&mut self) -> BufferResult<()> {
        let text = self.buffer.line(self.cursor.line)?;
        self.cursor.column = previous_word_boundary(text, self.cursor.column);
        Ok(())
    }

    // ==================== Insert-mode edits ====================

    /// Inserts a character at the cursor and advances one column.
    pub fn insert_char(&mut self, ch: char) -> BufferResult<()> {
        self.history.record_change(&self.buffer, self.cursor.line)?;
        self.buffer.insert_char(self.cursor, ch)?;
        self.cursor.column += 1;
        self.modified = true;
        Ok(())
    }

    /// Removes the character before the cursor.
    ///
    /// At column 0 nothing happens: lines are never joined. Returns whether
    /// a character was removed.
    pub fn delete_char_before(&mut self) -> BufferResult<bool> {
        let Position { line, column } = self.cursor;
        if column == 0 {
            return Ok(false);
        }
        self.history.record_change(&self.buffer, line)?;
        self.buffer.remove_range(line, column - 1..column)?;
        self.cursor.column -= 1;
        self.modified = true;
        Ok(true)
    }

    /// Splits the line at the cursor and moves to the start of the new line.
    ///
    /// Recorded as one undo step.
    pub fn split_line(&mut self) -> BufferResult<()> {
        let line = self.cursor.line;
        self.history.begin_group();
        let result = self.split_line_grouped(line);
        self.history.end_group();
        result?;

        self.cursor = Position::new(line + 1, 0);
        self.modified = true;
        Ok(())
    }

    fn split_line_grouped(&mut self, line: usize) -> BufferResult<()> {
        self.history.record_change(&self.buffer, line)?;
        self.buffer.split_line(self.cursor)?;
        self.history.record_insert(line + 1);
        Ok(())
    }

    // ==================== Normal-mode edits ====================

    /// Removes columns `[start, end)` from a line and puts the cursor at
    /// `start`. An empty range changes nothing and records nothing.
    pub fn delete_range(&mut self, line: usize, start: usize, end: usize) -> BufferResult<String> {
        if start >= end {
            self.move_to(Position::new(line, start));
            return Ok(String::new());
        }
        self.history.record_change(&self.buffer, line)?;
        let removed = self.buffer.remove_range(line, start..end)?;
        self.cursor = clamp(&self.buffer, Position::new(line, start));
        self.modified = true;
        Ok(removed)
    }

    /// Deletes from the cursor to the next word boundary (`x`, `dw`).
    pub fn delete_to_next_word(&mut self) -> BufferResult<String> {
        let Position { line, column } = self.cursor;
        let text = self.buffer.line(line)?;
        let end = next_word_boundary(text, column).column_or(text.chars().count());
        self.delete_range(line, column, end)
    }

    /// Cuts the current line and returns its content.
    ///
    /// Cutting the only line leaves one empty line.
    pub fn cut_line(&mut self) -> BufferResult<String> {
        let line = self.cursor.line;
        if self.buffer.len_lines() == 1 {
            self.history.record_change(&self.buffer, line)?;
        } else {
            self.history.record_remove(&self.buffer, line)?;
        }
        let content = self.buffer.delete_line(line)?;
        self.cursor = clamp(&self.buffer, self.cursor);
        self.modified = true;
        Ok(content)
    }

    /// Returns a copy of the current line.
    pub fn yank_line(&self) -> BufferResult<String> {
        Ok(self.buffer.line(self.cursor.line)?.to_string())
    }

    /// Inserts a line after (or before) the current line and moves to it.
    pub fn paste_line(&mut self, content: &str, after: bool) -> BufferResult<()> {
        let at = if after {
            self.cursor.line + 1
        } else {
            self.cursor.line
        };
        self.buffer.insert_line(at, content)?;
        self.history.record_insert(at);
        self.cursor = Position::new(at, 0);
        self.modified = true;
        Ok(())
    }

    /// Replaces every occurrence of `find` in every line.
    ///
    /// All changed lines form one undo step. Returns the number of
    /// occurrences replaced.
    pub fn replace_all(&mut self, find: &str, replace: &str) -> BufferResult<usize> {
        if find.is_empty() {
            return Ok(0);
        }

        let mut count = 0;
        self.history.begin_group();
        for line in 0..self.buffer.len_lines() {
            let text = self.buffer.line(line)?;
            let matches = text.matches(find).count();
            if matches == 0 {
                continue;
            }
            let replaced = text.replace(find, replace);
            if let Err(e) = self.history.record_change(&self.buffer, line) {
                self.history.end_group();
                return Err(e);
            }
            self.buffer.set_line(line, replaced)?;
            count += matches;
        }
        self.history.end_group();

        if count > 0 {
            self.cursor = clamp(&self.buffer, self.cursor);
            self.modified = true;
        }
        Ok(count)
    }

    // ==================== History ====================

    /// Undoes the last edit group. Returns false when there was nothing to
    /// undo.
    pub fn undo(&mut self) -> BufferResult<bool> {
        let line = self.history.undo(&mut self.buffer)?;
        Ok(self.after_history(line))
    }

    /// Redoes the last undone edit group.
    pub fn redo(&mut self) -> BufferResult<bool> {
        let line = self.history.redo(&mut self.buffer)?;
        Ok(self.after_history(line))
    }

    fn after_history(&mut self, line: Option<usize>) -> bool {
        match line {
            Some(line) => {
                self.cursor = clamp(&self.buffer, Position::new(line, self.cursor.column));
                self.modified = true;
                true
            }
            None => false,
        }
    }
}
