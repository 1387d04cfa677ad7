//! # Vix Buffer
//!
//! Line-oriented text storage for a modal editor.
//!
//! ## Key Concepts
//!
//! ### Ownership & Borrowing
//! - `TextBuffer` owns every line as a `String`
//! - `line()` hands out `&str` borrows; mutation needs `&mut self`
//! - `History` stores owned copies of displaced lines, since the live line
//!   keeps changing after the snapshot is taken
//!
//! ### Invariants
//! - A buffer always holds at least one line
//! - Columns are counted in `char`s, never bytes, so slicing cannot split a
//!   code point
//! - Cursor positions are only ever produced through [`clamp`]

mod buffer;
mod cursor;
mod history;
mod word;

pub use buffer::TextBuffer;
pub use cursor::{Position, clamp};
pub use history::{Edit, EditGroup, EditKind, History};
pub use word::{Boundary, is_word_char, next_word_boundary, previous_word_boundary};

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("Line {line} is out of bounds (buffer has {len} lines)")]
    LineOutOfBounds { line: usize, len: usize },

    #[error("Column {column} is out of bounds on line {line} (length {len})")]
    ColumnOutOfBounds {
        line: usize,
        column: usize,
        len: usize,
    },
}

/// Converts a char column into a byte offset within `text`.
///
/// A column equal to the char count maps to `text.len()`.
pub(crate) fn byte_offset(text: &str, column: usize) -> Option<usize> {
    if column == 0 {
        return Some(0);
    }
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .nth(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = TextBuffer::new();
        assert_eq!(buffer.len_lines(), 1);
        assert_eq!(buffer.line(0).unwrap(), "");
    }

    #[test]
    fn test_buffer_from_string() {
        let buffer = TextBuffer::from("Line 1\nLine 2\nLine 3");
        assert_eq!(buffer.len_lines(), 3);
        assert_eq!(buffer.line(1).unwrap(), "Line 2");
    }

    #[test]
    fn test_byte_offset() {
        assert_eq!(byte_offset("héllo", 0), Some(0));
        assert_eq!(byte_offset("héllo", 2), Some(3));
        assert_eq!(byte_offset("héllo", 5), Some(6));
        assert_eq!(byte_offset("héllo", 6), None);
    }

    #[test]
    fn test_undo_redo_through_history() {
        let mut buffer = TextBuffer::from("Hello");
        let mut history = History::new(100);

        history.record_change(&buffer, 0).unwrap();
        buffer.set_line(0, "Hello World").unwrap();

        history.undo(&mut buffer);
        assert_eq!(buffer.line(0).unwrap(), "Hello");

        history.redo(&mut buffer);
        assert_eq!(buffer.line(0).unwrap(), "Hello World");
    }
}
