//! Raw mode and alternate screen, restored on every exit path.
//!
//! ## Learning: RAII
//!
//! `TerminalGuard` enters raw mode when created and leaves it in `Drop`, so
//! returning early with `?` still restores the terminal. Release builds use
//! `panic = "abort"`, which skips unwinding, so a panic hook restores the
//! terminal too before the message is printed.

use std::io::{self, Write};
use std::sync::Once;

use crossterm::{cursor, execute, terminal};

/// Keeps the terminal in editor mode while alive.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        tracing::debug!("Terminal entered raw mode");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
        tracing::debug!("Terminal restored");
    }
}

/// Best-effort restore; errors are ignored because there is nowhere left
/// to report them.
pub fn restore() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::SetCursorStyle::DefaultUserShape);
    let _ = execute!(stdout, cursor::Show);
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            tracing::error!("panic: {}", info);
            previous(info);
        }));
    });
}
