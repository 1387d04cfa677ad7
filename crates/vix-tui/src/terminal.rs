//! Crossterm implementation of the editor's `Terminal` port.
//!
//! Every frame is redrawn in full: text rows, then the status line, then
//! the cursor. Rows are cut to the terminal width by display width, so
//! wide characters never wrap. Tabs are shown as a single space.

use std::borrow::Cow;
use std::io::{self, Write};

use crossterm::cursor::{self, SetCursorStyle};
use crossterm::event::{self, Event};
use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use tokio::sync::broadcast;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vix_core::config::UiConfig;
use vix_core::event::drain;
use vix_core::{EditorEvent, EditorMode, Key, Terminal, View};

use crate::input::translate;
use crate::theme::Theme;

/// Draws views with crossterm commands and reads keys from crossterm events.
pub struct CrosstermTerminal<W: Write> {
    out: W,
    theme: Theme,
    line_numbers: bool,
    /// First buffer line on screen
    top: usize,
    events: Option<broadcast::Receiver<EditorEvent>>,
}

impl<W: Write> CrosstermTerminal<W> {
    /// Creates a terminal writing to `out`.
    pub fn new(out: W, ui: &UiConfig) -> Self {
        Self {
            out,
            theme: Theme::from_config(ui),
            line_numbers: ui.line_numbers,
            top: 0,
            events: None,
        }
    }

    /// Listens to editor events (cursor shape follows the mode).
    pub fn attach(&mut self, events: broadcast::Receiver<EditorEvent>) {
        self.events = Some(events);
    }

    /// Returns the first visible line.
    pub fn top(&self) -> usize {
        self.top
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draws a frame on a `width` x `height` screen.
    pub fn draw(&mut self, view: &View<'_>, width: u16, height: u16) -> io::Result<()> {
        self.apply_events()?;

        let width = usize::from(width.max(1));
        let rows = usize::from(height.max(2)) - 1;
        self.scroll_to(view.cursor.line, rows);

        let gutter = if self.line_numbers {
            digits(view.lines.len()) + 1
        } else {
            0
        };

        queue!(self.out, cursor::Hide)?;
        for row in 0..rows {
            queue!(
                self.out,
                cursor::MoveTo(0, screen(row)),
                Clear(ClearType::CurrentLine)
            )?;
            let line = self.top + row;
            if line >= view.lines.len() {
                queue!(self.out, Print("~"))?;
                continue;
            }
            self.draw_line(view, line, gutter, width)?;
        }

        self.draw_status(view, rows, width)?;

        let (x, y) = match view.prompt {
            Some(_) => {
                let prefix = status_prefix(view.mode);
                (prefix.width() + view.status_text().width(), rows)
            }
            None => {
                let text = view.lines.get(view.cursor.line).map_or("", String::as_str);
                let before: usize = text
                    .chars()
                    .take(view.cursor.column)
                    .map(char_width)
                    .sum();
                (gutter + before, view.cursor.line - self.top)
            }
        };
        queue!(
            self.out,
            cursor::MoveTo(screen(x.min(width - 1)), screen(y)),
            cursor::Show
        )?;
        self.out.flush()
    }

    fn draw_line(&mut self, view: &View<'_>, line: usize, gutter: usize, width: usize) -> io::Result<()> {
        let mut used = 0;
        if gutter > 0 {
            let number = format!("{:>w$} ", line + 1, w = gutter - 1);
            let (number, w) = fit(&number, width);
            queue!(
                self.out,
                SetForegroundColor(self.theme.gutter),
                Print(number),
                ResetColor
            )?;
            used += w;
        }

        for span in view.spans(line) {
            let text = display_text(span.text);
            let (fitted, w) = fit(&text, width - used);
            if fitted.is_empty() {
                break;
            }
            if span.is_keyword() {
                queue!(
                    self.out,
                    SetForegroundColor(self.theme.keyword),
                    Print(fitted),
                    ResetColor
                )?;
            } else {
                queue!(self.out, Print(fitted))?;
            }
            used += w;
            if fitted.len() < text.len() {
                break;
            }
        }
        Ok(())
    }

    fn draw_status(&mut self, view: &View<'_>, row: usize, width: usize) -> io::Result<()> {
        let left = format!("{}{}", status_prefix(view.mode), view.status_text());
        let right = format!("{} ", view.file_info());

        let (right, right_width) = fit(&right, width);
        let (left, left_width) = fit(&left, width - right_width);
        let padding = " ".repeat(width - right_width - left_width);

        queue!(
            self.out,
            cursor::MoveTo(0, screen(row)),
            Clear(ClearType::CurrentLine),
            SetBackgroundColor(self.theme.status_bg),
            SetForegroundColor(self.theme.status_fg),
            Print(left),
            Print(padding),
            Print(right),
            ResetColor
        )
    }

    fn draw_prompt(&mut self, prompt: &str, text: &str, width: u16, height: u16) -> io::Result<()> {
        let line = format!("{}{}", prompt, text);
        let (line, w) = fit(&line, usize::from(width.max(1)));
        let row = height.max(1) - 1;
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            Clear(ClearType::CurrentLine),
            Print(line),
            cursor::MoveTo(screen(w), row),
            cursor::Show
        )?;
        self.out.flush()
    }

    fn scroll_to(&mut self, line: usize, rows: usize) {
        if line < self.top {
            self.top = line;
        } else if line >= self.top + rows {
            self.top = line + 1 - rows;
        }
    }

    fn apply_events(&mut self) -> io::Result<()> {
        let Some(receiver) = self.events.as_mut() else {
            return Ok(());
        };
        for event in drain(receiver) {
            tracing::trace!(?event, "editor event");
            if let EditorEvent::ModeChanged(mode) = event {
                let style = match mode {
                    EditorMode::Insert => SetCursorStyle::SteadyBar,
                    _ => SetCursorStyle::SteadyBlock,
                };
                queue!(self.out, style)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Terminal for CrosstermTerminal<W> {
    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.draw(view, width, height)
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(event) = event::read()? {
                if let Some(key) = translate(&event)? {
                    return Ok(key);
                }
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut text = String::new();
        loop {
            let (width, height) = terminal::size()?;
            self.draw_prompt(prompt, &text, width, height)?;
            match self.read_key()? {
                Key::Enter => return Ok(text),
                Key::Escape => return Ok(String::new()),
                Key::Backspace | Key::Delete => {
                    text.pop();
                }
                key => {
                    if let Some(ch) = key.printable() {
                        text.push(ch);
                    }
                }
            }
        }
    }
}

fn status_prefix(mode: EditorMode) -> String {
    format!(" {} ", mode.as_str())
}

/// Width of a char on screen; tabs are drawn as one space.
fn char_width(ch: char) -> usize {
    if ch == '\t' {
        1
    } else {
        ch.width().unwrap_or(0)
    }
}

fn display_text(text: &str) -> Cow<'_, str> {
    if text.contains('\t') {
        Cow::Owned(text.replace('\t', " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Returns the longest prefix of `text` that fits in `max` columns, and its
/// width.
fn fit(text: &str, max: usize) -> (&str, usize) {
    let mut used = 0;
    for (i, ch) in text.char_indices() {
        let w = char_width(ch);
        if used + w > max {
            return (&text[..i], used);
        }
        used += w;
    }
    (text, used)
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

fn screen(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
