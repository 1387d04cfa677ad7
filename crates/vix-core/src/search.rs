//! Literal, line-oriented search.
//!
//! Matching is case-sensitive substring search; there is no regex and no
//! wraparound. Reaching the first or last line without a match reports
//! [`SearchError::NotFound`].

use vix_buffer::{Position, TextBuffer};

/// Search failures, shown to the user as status text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Pattern not found: {0}")]
    NotFound(String),

    #[error("No previous search pattern")]
    NoPreviousQuery,
}

/// Search state: the last query, reused by `n` and `N`.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    last_query: Option<String>,
}

impl SearchEngine {
    /// Creates an engine with no previous query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the query `n`/`N` would use.
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Searches from `from` towards the end of the buffer.
    ///
    /// On the starting line the search begins at `from.column`; later lines
    /// are searched from column 0. The query becomes the last query even if
    /// nothing matches. An empty query reuses the last query.
    pub fn search_forward(
        &mut self,
        buffer: &TextBuffer,
        query: &str,
        from: Position,
    ) -> Result<Position, SearchError> {
        if !query.is_empty() {
            self.last_query = Some(query.to_string());
        }
        let query = self.last_query.as_deref().ok_or(SearchError::NoPreviousQuery)?;

        find_forward(buffer, query, from).ok_or_else(|| SearchError::NotFound(query.to_string()))
    }

    /// Finds the next match strictly after `at`.
    pub fn repeat_forward(&self, buffer: &TextBuffer, at: Position) -> Result<Position, SearchError> {
        let query = self.last_query.as_deref().ok_or(SearchError::NoPreviousQuery)?;
        let from = Position::new(at.line, at.column + 1);

        find_forward(buffer, query, from).ok_or_else(|| SearchError::NotFound(query.to_string()))
    }

    /// Finds the closest match strictly before `at`.
    pub fn repeat_backward(&self, buffer: &TextBuffer, at: Position) -> Result<Position, SearchError> {
        let query = self.last_query.as_deref().ok_or(SearchError::NoPreviousQuery)?;

        find_backward(buffer, query, at).ok_or_else(|| SearchError::NotFound(query.to_string()))
    }
}

fn find_forward(buffer: &TextBuffer, query: &str, from: Position) -> Option<Position> {
    (from.line..buffer.len_lines()).find_map(|line| {
        let start = if line == from.line { from.column } else { 0 };
        buffer
            .find_in_line(line, query, start)
            .map(|column| Position::new(line, column))
    })
}

fn find_backward(buffer: &TextBuffer, query: &str, at: Position) -> Option<Position> {
    let first = at.line.min(buffer.len_lines() - 1);
    (0..=first).rev().find_map(|line| {
        let before = (line == at.line).then_some(at.column);
        buffer
            .rfind_in_line(line, query, before)
            .map(|column| Position::new(line, column))
    })
}
