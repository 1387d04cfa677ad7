//! The Terminal port and the run loop.
//!
//! The core never draws. Each frame it hands a borrowed [`View`] to a
//! [`Terminal`] implementation, then blocks on the next key. Highlight
//! spans are not precomputed: `View::spans` tokenizes a line only when the
//! renderer asks for it, so lines scrolled out of sight cost nothing.

use std::io;

use vix_buffer::Position;
use vix_syntax::{KeywordSet, Tokens, tokenize};

use crate::editor::{Editor, EditorMode};
use crate::keymap::Key;

/// Rendering and input capability consumed by the editor.
pub trait Terminal {
    /// Draws one frame.
    fn render(&mut self, view: &View<'_>) -> io::Result<()>;

    /// Blocks until the next key is available.
    fn read_key(&mut self) -> io::Result<Key>;

    /// Reads one echoed line of input after showing `prompt`.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// A read-only snapshot of everything a frame needs.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Buffer lines
    pub lines: &'a [String],
    /// Cursor position
    pub cursor: Position,
    /// Current mode
    pub mode: EditorMode,
    /// Status message
    pub status: &'a str,
    /// Prompt symbol and typed text while in Command mode
    pub prompt: Option<(char, &'a str)>,
    /// Document display name
    pub file_name: &'a str,
    /// Unsaved changes
    pub modified: bool,
    keywords: &'a KeywordSet,
}

impl<'a> View<'a> {
    /// Creates a view.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lines: &'a [String],
        cursor: Position,
        mode: EditorMode,
        status: &'a str,
        prompt: Option<(char, &'a str)>,
        file_name: &'a str,
        modified: bool,
        keywords: &'a KeywordSet,
    ) -> Self {
        Self {
            lines,
            cursor,
            mode,
            status,
            prompt,
            file_name,
            modified,
            keywords,
        }
    }

    /// Returns the highlight spans of a line. Out-of-range lines yield no
    /// spans.
    pub fn spans(&self, line: usize) -> Tokens<'a> {
        let text = self.lines.get(line).map(String::as_str).unwrap_or("");
        tokenize(text, self.keywords)
    }

    /// Returns the text for the status line: the command being typed, or
    /// the last message.
    pub fn status_text(&self) -> String {
        match self.prompt {
            Some((symbol, text)) => format!("{}{}", symbol, text),
            None => self.status.to_string(),
        }
    }

    /// Returns the right-aligned file information.
    pub fn file_info(&self) -> String {
        format!(
            "{}{} {}",
            self.file_name,
            if self.modified { " [+]" } else { "" },
            self.cursor
        )
    }
}

/// Renders, reads a key and dispatches it until the editor quits.
///
/// Only terminal I/O errors end the loop early; editing errors are already
/// status text by the time `handle_key` returns.
pub fn run<T: Terminal + ?Sized>(editor: &mut Editor, terminal: &mut T) -> io::Result<()> {
    tracing::debug!("Entering run loop");
    while !editor.should_quit() {
        terminal.render(&editor.view())?;
        let key = terminal.read_key()?;
        editor.handle_key(key);
    }
    tracing::debug!("Leaving run loop");
    Ok(())
}
