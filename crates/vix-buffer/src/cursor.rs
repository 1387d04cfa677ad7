//! Cursor positions and clamping.
//!
//! ## Learning: Newtype Pattern
//!
//! `Position` is a struct that wraps line/column coordinates.
//! This is better than using `(usize, usize)` because:
//! - Type safety: Can't accidentally swap line and column
//! - Named fields: Self-documenting code
//! - Methods: Can add behavior specific to positions
//!
//! ## One clamp to rule them all
//!
//! Every motion and every structural edit ends in [`clamp`]. It clamps the
//! line first and then the column against the *resulting* line, so a motion
//! that lands on a shorter line can never keep a column from the line it
//! left.

use crate::TextBuffer;

/// A position in the text buffer (line and column).
///
/// Both line and column are 0-indexed. The column counts characters and
/// may equal the line length (the append position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters not bytes)
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Position at the start of the document.
    pub const ZERO: Position = Position { line: 0, column: 0 };

    /// Returns the tentative position `(column + dx, line + dy)` without any
    /// clamping. Negative results saturate at zero.
    pub fn offset(self, dx: isize, dy: isize) -> Position {
        Position {
            line: self.line.saturating_add_signed(dy),
            column: self.column.saturating_add_signed(dx),
        }
    }

    /// Moves by `(dx, dy)` and clamps against `buffer`.
    pub fn move_by(self, buffer: &TextBuffer, dx: isize, dy: isize) -> Position {
        clamp(buffer, self.offset(dx, dy))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display as 1-indexed for user-facing output
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Clamps a position into the buffer.
///
/// The line is clamped to `[0, len_lines - 1]`, then the column to
/// `[0, line_len(line)]` of that clamped line.
pub fn clamp(buffer: &TextBuffer, pos: Position) -> Position {
    let line = pos.line.min(buffer.len_lines() - 1);
    let line_len = buffer.line_len(line).unwrap_or(0);
    Position {
        line,
        column: pos.column.min(line_len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_ordering() {
        let p1 = Position::new(1, 5);
        let p2 = Position::new(2, 3);
        let p3 = Position::new(1, 10);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert_eq!(p1.max(p3), p3);
    }

    #[test]
    fn test_clamp_uses_destination_line() {
        let buffer = TextBuffer::from("a long line\nab");
        let pos = Position::new(0, 9).move_by(&buffer, 0, 1);
        assert_eq!(pos, Position::new(1, 2));
    }

    #[test]
    fn test_move_saturates_at_origin() {
        let buffer = TextBuffer::from("abc\ndef");
        assert_eq!(Position::ZERO.move_by(&buffer, -1, -1), Position::ZERO);
        assert_eq!(Position::new(1, 3).move_by(&buffer, 1, 5), Position::new(1, 3));
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(Position::new(0, 4).to_string(), "1:5");
    }

    proptest! {
        #[test]
        fn prop_clamp_stays_in_bounds(
            lines in proptest::collection::vec("[a-z ]{0,12}", 1..10),
            line in 0usize..40,
            column in 0usize..40,
        ) {
            let buffer = TextBuffer::from_lines(lines);
            let pos = clamp(&buffer, Position::new(line, column));
            prop_assert!(pos.line < buffer.len_lines());
            prop_assert!(pos.column <= buffer.line_len(pos.line).unwrap());
        }
    }
}
