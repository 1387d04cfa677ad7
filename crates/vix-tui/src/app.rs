//! Application startup: terminal setup, first file, run loop.

use std::io;
use std::path::PathBuf;

use vix_core::{Config, Editor, FsStore, Terminal};

use crate::guard::TerminalGuard;
use crate::terminal::CrosstermTerminal;

/// Launch options.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// File to open; prompted for when absent
    pub file: Option<PathBuf>,
    /// Loaded configuration
    pub config: Config,
}

/// Runs the editor on the real terminal until the user quits.
///
/// The terminal is restored before this returns, whatever the outcome.
/// Ctrl-C surfaces as an `Interrupted` error.
pub fn run(flags: Flags) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;

    let mut terminal = CrosstermTerminal::new(io::stdout(), &flags.config.ui);
    let store = FsStore::new().with_final_newline(flags.config.files.final_newline);
    let mut editor = Editor::with_config(flags.config, Box::new(store));
    terminal.attach(editor.subscribe());

    let file = match flags.file {
        Some(path) => Some(path),
        None => {
            let name = terminal.read_line("File name: ")?;
            let name = name.trim();
            (!name.is_empty()).then(|| PathBuf::from(name))
        }
    };

    if let Some(path) = file {
        if let Err(e) = editor.open_or_create(&path) {
            tracing::warn!("Could not open {}: {}", path.display(), e);
            editor.set_status(e.to_string());
        }
    }

    vix_core::run(&mut editor, &mut terminal)
}
