//! Line buffer implementation.
//!
//! ## Why a vector of lines?
//!
//! Every operation in a vi-like editor is line-addressed: cursor motion,
//! undo snapshots, whole-line cut and paste, line-by-line search. Storing
//! the buffer as `Vec<String>` makes each of those an index operation and
//! makes a line the natural unit of undo.
//!
//! ## Learning: Ownership in Action
//!
//! ```rust,ignore
//! let mut buffer = TextBuffer::from("abc");
//! let line = buffer.line(0)?;        // line BORROWS from buffer
//! // buffer.set_line(0, "x");        // ERROR! Can't mutate while borrowed
//! let owned = line.to_string();      // Copy out what we need
//! buffer.set_line(0, "x")?;          // Now OK!
//! ```

use std::ops::Range;

use crate::{BufferError, BufferResult, Position, byte_offset};

/// An ordered, never-empty sequence of lines.
///
/// Indices are 0-based. No method moves a cursor: callers re-clamp their
/// positions with [`crate::clamp`] after any structural change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// Creates a buffer holding a single empty line.
    ///
    /// # Example
    /// ```
    /// use vix_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert_eq!(buffer.len_lines(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Creates a buffer from any sequence of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buffer = Self::new();
        buffer.load(lines.into_iter().map(Into::into).collect());
        buffer
    }

    /// Replaces the whole content. An empty sequence becomes one empty line.
    pub fn load(&mut self, lines: Vec<String>) {
        self.lines = lines;
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    // ==================== Access ====================

    /// Returns the number of lines. Never zero.
    #[inline]
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Returns the line at `at`.
    pub fn line(&self, at: usize) -> BufferResult<&str> {
        self.lines
            .get(at)
            .map(String::as_str)
            .ok_or(BufferError::LineOutOfBounds {
                line: at,
                len: self.lines.len(),
            })
    }

    /// Returns the length of a line in characters.
    pub fn line_len(&self, at: usize) -> BufferResult<usize> {
        Ok(self.line(at)?.chars().count())
    }

    /// Iterates over all lines in order.
    pub fn lines(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// Borrows the lines as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    /// Returns true if the buffer is a single empty line.
    pub fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    // ==================== Structural edits ====================

    /// Inserts a line before index `at`; `at == len_lines()` appends.
    pub fn insert_line(&mut self, at: usize, content: impl Into<String>) -> BufferResult<()> {
        if at > self.lines.len() {
            return Err(BufferError::LineOutOfBounds {
                line: at,
                len: self.lines.len(),
            });
        }
        self.lines.insert(at, content.into());
        Ok(())
    }

    /// Deletes the line at `at` and returns its content.
    ///
    /// Deleting the only remaining line leaves a single empty line.
    pub fn delete_line(&mut self, at: usize) -> BufferResult<String> {
        self.check_line(at)?;
        if self.lines.len() == 1 {
            return Ok(std::mem::take(&mut self.lines[0]));
        }
        Ok(self.lines.remove(at))
    }

    /// Replaces the content of a line and returns the previous content.
    pub fn set_line(&mut self, at: usize, content: impl Into<String>) -> BufferResult<String> {
        self.check_line(at)?;
        Ok(std::mem::replace(&mut self.lines[at], content.into()))
    }

    // ==================== In-line edits ====================

    /// Inserts a character at a position. `pos.column` may equal the line
    /// length (append).
    pub fn insert_char(&mut self, pos: Position, ch: char) -> BufferResult<()> {
        let offset = self.byte_offset_at(pos)?;
        self.lines[pos.line].insert(offset, ch);
        Ok(())
    }

    /// Removes the chars in `columns` from a line and returns them.
    pub fn remove_range(&mut self, line: usize, columns: Range<usize>) -> BufferResult<String> {
        let start = self.byte_offset_at(Position::new(line, columns.start))?;
        let end = self.byte_offset_at(Position::new(line, columns.end.max(columns.start)))?;
        Ok(self.lines[line].drain(start..end).collect())
    }

    /// Splits a line at a position; the tail becomes a new line below.
    pub fn split_line(&mut self, pos: Position) -> BufferResult<()> {
        let offset = self.byte_offset_at(pos)?;
        let tail = self.lines[pos.line].split_off(offset);
        self.lines.insert(pos.line + 1, tail);
        Ok(())
    }

    // ==================== Search primitives ====================

    /// Finds the first occurrence of `pattern` on a line starting at or
    /// after char column `from`. Returns the match column.
    pub fn find_in_line(&self, line: usize, pattern: &str, from: usize) -> Option<usize> {
        let text = self.lines.get(line)?;
        let start = byte_offset(text, from)?;
        text[start..]
            .find(pattern)
            .map(|byte_idx| from + text[start..start + byte_idx].chars().count())
    }

    /// Finds the last occurrence of `pattern` on a line whose start column is
    /// strictly before `before` (or anywhere on the line when `None`).
    pub fn rfind_in_line(&self, line: usize, pattern: &str, before: Option<usize>) -> Option<usize> {
        let text = self.lines.get(line)?;
        let limit = before.unwrap_or(usize::MAX);
        text.char_indices()
            .enumerate()
            .take_while(|(column, _)| *column < limit)
            .filter(|(_, (byte_idx, _))| text[*byte_idx..].starts_with(pattern))
            .map(|(column, _)| column)
            .last()
    }

    // ==================== Helpers ====================

    fn check_line(&self, at: usize) -> BufferResult<()> {
        if at >= self.lines.len() {
            return Err(BufferError::LineOutOfBounds {
                line: at,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn byte_offset_at(&self, pos: Position) -> BufferResult<usize> {
        let text = self.line(pos.line)?;
        byte_offset(text, pos.column).ok_or(BufferError::ColumnOutOfBounds {
            line: pos.line,
            column: pos.column,
            len: text.chars().count(),
        })
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self::from_lines(s.lines())
    }
}

impl From<String> for TextBuffer {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Vec<String>> for TextBuffer {
    fn from(lines: Vec<String>) -> Self {
        let mut buffer = Self::new();
        buffer.load(lines);
        buffer
    }
}
