//! Translation from crossterm key events to editor keys.

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use vix_core::Key;

/// Maps a crossterm key event to an editor key.
///
/// Returns `Ok(None)` for events the editor ignores (releases, function
/// keys). Ctrl-C is not a key: it ends the session with
/// `ErrorKind::Interrupted`.
pub fn translate(event: &KeyEvent) -> io::Result<Option<Key>> {
    if event.kind == KeyEventKind::Release {
        return Ok(None);
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let key = match event.code {
        KeyCode::Char('c') if ctrl => {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return Ok(None),
    };
    Ok(Some(key))
}
