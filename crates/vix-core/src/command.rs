//! Commands: Normal-mode actions and the `:` command language.
//!
//! ## Learning: Enums as Commands
//!
//! Actions are plain enum values:
//! - Key bindings map to a [`Command`] without knowing how it runs
//! - The `:` line parses into an [`ExCommand`] before anything executes,
//!   so a malformed line can never half-apply
//!
//! The `:` language is case-sensitive and space-significant:
//!
//! | Input             | Meaning                                   |
//! |-------------------|-------------------------------------------|
//! | `w`, `w <path>`   | save (optionally to a new path)           |
//! | `q`               | quit                                      |
//! | `wq`              | save, then quit                           |
//! | `u`, `r`          | undo, redo                                |
//! | `/`, `/<query>`   | open the search prompt, or search         |
//! | `s/<old>/<new>`   | replace every occurrence in every line    |
//! | `e <path>`        | load a file, discarding unsaved state     |

/// Built-in Normal-mode commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Cursor movement
    MoveLeft,
    MoveDown,
    MoveUp,
    MoveRight,
    WordForward,
    WordBackward,

    // Edit commands
    DeleteWord,
    ChangeWord,
    DeleteLine,
    YankLine,
    PasteAfter,
    PasteBefore,
    Undo,
    Redo,

    // Search
    SearchPrompt,
    SearchNext,
    SearchPrevious,

    // Mode
    EnterInsertMode,
    EnterCommandMode,

    // File commands
    Write,
    Quit,
    WriteQuit,
}

impl Command {
    /// Every command, in display order.
    pub const ALL: [Command; 22] = [
        Command::MoveLeft,
        Command::MoveDown,
        Command::MoveUp,
        Command::MoveRight,
        Command::WordForward,
        Command::WordBackward,
        Command::DeleteWord,
        Command::ChangeWord,
        Command::DeleteLine,
        Command::YankLine,
        Command::PasteAfter,
        Command::PasteBefore,
        Command::Undo,
        Command::Redo,
        Command::SearchPrompt,
        Command::SearchNext,
        Command::SearchPrevious,
        Command::EnterInsertMode,
        Command::EnterCommandMode,
        Command::Write,
        Command::Quit,
        Command::WriteQuit,
    ];

    /// Returns the command's display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Command::MoveLeft => "Move Left",
            Command::MoveDown => "Move Down",
            Command::MoveUp => "Move Up",
            Command::MoveRight => "Move Right",
            Command::WordForward => "Next Word",
            Command::WordBackward => "Previous Word",
            Command::DeleteWord => "Delete Word",
            Command::ChangeWord => "Change Word",
            Command::DeleteLine => "Cut Line",
            Command::YankLine => "Copy Line",
            Command::PasteAfter => "Paste After",
            Command::PasteBefore => "Paste Before",
            Command::Undo => "Undo",
            Command::Redo => "Redo",
            Command::SearchPrompt => "Search",
            Command::SearchNext => "Find Next",
            Command::SearchPrevious => "Find Previous",
            Command::EnterInsertMode => "Enter Insert Mode",
            Command::EnterCommandMode => "Enter Command Mode",
            Command::Write => "Save",
            Command::Quit => "Quit",
            Command::WriteQuit => "Save and Quit",
        }
    }

    /// Returns the identifier used in config key bindings.
    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveLeft => "move_left",
            Command::MoveDown => "move_down",
            Command::MoveUp => "move_up",
            Command::MoveRight => "move_right",
            Command::WordForward => "word_forward",
            Command::WordBackward => "word_backward",
            Command::DeleteWord => "delete_word",
            Command::ChangeWord => "change_word",
            Command::DeleteLine => "delete_line",
            Command::YankLine => "yank_line",
            Command::PasteAfter => "paste_after",
            Command::PasteBefore => "paste_before",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::SearchPrompt => "search",
            Command::SearchNext => "search_next",
            Command::SearchPrevious => "search_previous",
            Command::EnterInsertMode => "insert_mode",
            Command::EnterCommandMode => "command_mode",
            Command::Write => "write",
            Command::Quit => "quit",
            Command::WriteQuit => "write_quit",
        }
    }

    /// Looks a command up by its config identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cmd| cmd.name() == name)
    }
}

/// A parsed `:` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// `w` or `w <path>`
    Write(Option<String>),
    /// `q`
    Quit,
    /// `wq`
    WriteQuit,
    /// `u`
    Undo,
    /// `r`
    Redo,
    /// `/` (open prompt) or `/<query>`
    Search(Option<String>),
    /// `s/<find>/<replace>`
    Substitute { find: String, replace: String },
    /// `e <path>`
    Edit(String),
}

impl ExCommand {
    /// Parses a command line (without the leading `:`).
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        match input {
            "w" => return Ok(ExCommand::Write(None)),
            "q" => return Ok(ExCommand::Quit),
            "wq" => return Ok(ExCommand::WriteQuit),
            "u" => return Ok(ExCommand::Undo),
            "r" => return Ok(ExCommand::Redo),
            "/" => return Ok(ExCommand::Search(None)),
            "w " => return Err(CommandError::MissingArgument("w")),
            "e" | "e " => return Err(CommandError::MissingArgument("e")),
            _ => {}
        }

        if let Some(path) = input.strip_prefix("w ") {
            return Ok(ExCommand::Write(Some(path.to_string())));
        }
        if let Some(path) = input.strip_prefix("e ") {
            return Ok(ExCommand::Edit(path.to_string()));
        }
        if let Some(query) = input.strip_prefix('/') {
            return Ok(ExCommand::Search(Some(query.to_string())));
        }
        if let Some(rest) = input.strip_prefix("s/") {
            return Self::parse_substitute(input, rest);
        }

        Err(CommandError::Unknown(input.to_string()))
    }

    fn parse_substitute(input: &str, rest: &str) -> Result<Self, CommandError> {
        let (find, replace) = rest
            .split_once('/')
            .ok_or_else(|| CommandError::InvalidSubstitution(input.to_string()))?;
        if find.is_empty() {
            return Err(CommandError::InvalidSubstitution(input.to_string()));
        }
        let replace = replace.strip_suffix('/').unwrap_or(replace);
        Ok(ExCommand::Substitute {
            find: find.to_string(),
            replace: replace.to_string(),
        })
    }
}

/// Errors from parsing a `:` command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Not an editor command: {0}")]
    Unknown(String),

    #[error("Argument required: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid substitution: {0} (expected s/old/new)")]
    InvalidSubstitution(String),
}
