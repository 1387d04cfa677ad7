//! # Vix Syntax
//!
//! Keyword highlighting by file extension.
//!
//! ## How it works
//!
//! 1. When a file is loaded, [`KeywordSet::for_extension`] picks the
//!    reserved words for its extension (unknown extensions get none).
//! 2. At render time, [`tokenize`] splits each line into spans: maximal
//!    word runs and single separator characters. Word spans whose text is in
//!    the set are flagged [`HighlightKind::Keyword`].
//!
//! The core never paints anything; spans are handed to the terminal port,
//! which picks the styling.
//!
//! ## Learning: Lazy Iterators
//!
//! `tokenize` returns a [`Tokens`] iterator instead of a `Vec`. Nothing is
//! scanned until the renderer asks for the next span, and because `Tokens`
//! is `Clone`, a consumer can restart from any point for free.

mod keywords;

use std::collections::HashSet;

use vix_buffer::is_word_char;

/// Reserved words for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    language: Option<&'static str>,
    words: HashSet<String>,
}

impl KeywordSet {
    /// An empty set: no word is a keyword.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Selects the reserved words for a file extension.
    ///
    /// The mapping is exact and case-sensitive; unknown extensions yield an
    /// empty set rather than an error.
    pub fn for_extension(ext: &str) -> Self {
        let (language, tables): (&'static str, &[&[&str]]) = match ext {
            "c" | "h" => ("c", &[keywords::C]),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => ("cpp", &[keywords::C, keywords::CPP_EXTRA]),
            "rs" => ("rust", &[keywords::RUST]),
            "py" => ("python", &[keywords::PYTHON]),
            "js" | "jsx" | "ts" | "tsx" => ("javascript", &[keywords::JAVASCRIPT]),
            "go" => ("go", &[keywords::GO]),
            "java" => ("java", &[keywords::JAVA]),
            "sh" | "bash" => ("bash", &[keywords::SHELL]),
            _ => {
                tracing::debug!("No keyword set for extension {:?}", ext);
                return Self::empty();
            }
        };

        let words = tables
            .iter()
            .flat_map(|table| table.iter())
            .map(|word| word.to_string())
            .collect();
        Self {
            language: Some(language),
            words,
        }
    }

    /// Adds user-supplied words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    /// Returns true if `word` is reserved.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Returns the language name the set was chosen for.
    pub fn language(&self) -> Option<&'static str> {
        self.language
    }

    /// Returns the number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing will be highlighted.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Types of span for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// A word found in the active keyword set
    Keyword,
    /// Any other word
    Word,
    /// A single non-word character
    Other,
}

/// A highlighted span of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    /// Start column (chars)
    pub start: usize,
    /// End column, exclusive (chars)
    pub end: usize,
    /// The span's text
    pub text: &'a str,
    /// Kind of span
    pub kind: HighlightKind,
}

impl HighlightSpan<'_> {
    /// Returns true if the span is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind == HighlightKind::Keyword
    }
}

/// Lazy span iterator over one line. See [`tokenize`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    line: &'a str,
    byte: usize,
    column: usize,
    keywords: &'a KeywordSet,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = HighlightSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.line[self.byte..];
        let first = rest.chars().next()?;

        let (len_bytes, len_chars, kind) = if is_word_char(first) {
            let mut bytes = 0;
            let mut chars = 0;
            for ch in rest.chars().take_while(|ch| is_word_char(*ch)) {
                bytes += ch.len_utf8();
                chars += 1;
            }
            let kind = if self.keywords.contains(&rest[..bytes]) {
                HighlightKind::Keyword
            } else {
                HighlightKind::Word
            };
            (bytes, chars, kind)
        } else {
            (first.len_utf8(), 1, HighlightKind::Other)
        };

        let span = HighlightSpan {
            start: self.column,
            end: self.column + len_chars,
            text: &rest[..len_bytes],
            kind,
        };
        self.byte += len_bytes;
        self.column += len_chars;
        Some(span)
    }
}

/// Splits a line into word and separator spans.
pub fn tokenize<'a>(line: &'a str, keywords: &'a KeywordSet) -> Tokens<'a> {
    Tokens {
        line,
        byte: 0,
        column: 0,
        keywords,
    }
}
