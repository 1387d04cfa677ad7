//! Word boundary scanning.
//!
//! A word is a run of alphanumeric characters or underscores. Everything
//! else (spaces, punctuation) is a separator run. Scanning never looks past
//! the line it is given; crossing to the next line is the caller's call.

/// Result of a forward word scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The next word starts at this column
    Column(usize),
    /// The scan reached the end of the line
    EndOfLine,
}

impl Boundary {
    /// Resolves the boundary to a column on a line of `line_len` chars.
    pub fn column_or(self, line_len: usize) -> usize {
        match self {
            Boundary::Column(column) => column,
            Boundary::EndOfLine => line_len,
        }
    }
}

/// Returns true for characters that belong to a word.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Skips the word run at `column` (if any), then the separator run after it.
pub fn next_word_boundary(line: &str, column: usize) -> Boundary {
    let chars: Vec<char> = line.chars().collect();
    let mut col = column;

    while col < chars.len() && is_word_char(chars[col]) {
        col += 1;
    }
    while col < chars.len() && !is_word_char(chars[col]) {
        col += 1;
    }

    if col >= chars.len() {
        Boundary::EndOfLine
    } else {
        Boundary::Column(col)
    }
}

/// Skips separators backward from `column`, then the word before them.
///
/// Stops at column 0; never wraps to the previous line.
pub fn previous_word_boundary(line: &str, column: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut col = column.min(chars.len());

    while col > 0 && !is_word_char(chars[col - 1]) {
        col -= 1;
    }
    while col > 0 && is_word_char(chars[col - 1]) {
        col -= 1;
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_word() {
        let line = "foo.bar baz";
        assert_eq!(next_word_boundary(line, 0), Boundary::Column(4));
        assert_eq!(next_word_boundary(line, 4), Boundary::Column(8));
        assert_eq!(next_word_boundary(line, 8), Boundary::EndOfLine);
    }

    #[test]
    fn test_next_word_from_separator() {
        assert_eq!(next_word_boundary("a   b", 1), Boundary::Column(4));
    }

    #[test]
    fn test_next_word_past_end() {
        assert_eq!(next_word_boundary("abc", 3), Boundary::EndOfLine);
        assert_eq!(next_word_boundary("", 0), Boundary::EndOfLine);
        assert_eq!(Boundary::EndOfLine.column_or(3), 3);
    }

    #[test]
    fn test_previous_word() {
        let line = "foo bar_baz";
        assert_eq!(previous_word_boundary(line, 4), 0);
        assert_eq!(previous_word_boundary(line, 6), 4);
        assert_eq!(previous_word_boundary(line, 11), 4);
        assert_eq!(previous_word_boundary(line, 0), 0);
        assert_eq!(previous_word_boundary(line, 99), 4);
    }

    proptest! {
        #[test]
        fn prop_next_word_terminates(line in "[a-z_ .,;()0-9]{0,40}", start in 0usize..45) {
            let len = line.chars().count();
            let mut column = start;
            let mut steps = 0;
            loop {
                match next_word_boundary(&line, column) {
                    Boundary::Column(next) => {
                        prop_assert!(next > column);
                        column = next;
                    }
                    Boundary::EndOfLine => break,
                }
                steps += 1;
                prop_assert!(steps <= len);
            }
        }
    }
}
