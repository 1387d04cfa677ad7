//! Main editor orchestration: the modal state machine.
//!
//! ## Learning: The Facade Pattern
//!
//! `Editor` acts as a facade. The terminal adapter only calls
//! [`Editor::handle_key`] and [`Editor::view`]; everything else (document,
//! keymap, search state, clipboard, file store) stays behind it.
//!
//! ## Modes
//!
//! ```text
//!            i, cw                 :, /
//!   Insert <-------- Normal --------------> Command
//!          --------->       <--------------
//!             Esc             Enter, Esc
//! ```
//!
//! Quitting is a flag checked by the run loop, not a mode.

use std::path::{Path, PathBuf};

use vix_buffer::Position;
use vix_syntax::KeywordSet;

use crate::command::{Command, ExCommand};
use crate::config::Config;
use crate::document::Document;
use crate::event::{EditorEvent, EventBus};
use crate::keymap::{Key, Keymap, KeymapResult};
use crate::search::{SearchEngine, SearchError};
use crate::store::{FileStore, StoreError};
use crate::terminal::View;
use crate::{CoreError, CoreResult};

/// Editor modes (inspired by modal editors like Vim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// Normal mode - navigation and commands
    #[default]
    Normal,
    /// Insert mode - typing text
    Insert,
    /// Command mode - entering a `:` command or a `/` query
    Command,
}

impl EditorMode {
    /// Returns the mode name shown in the status line.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Normal => "NORMAL",
            EditorMode::Insert => "INSERT",
            EditorMode::Command => "COMMAND",
        }
    }
}

/// What the command line is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prompt {
    /// A `:` command
    #[default]
    Ex,
    /// A `/` search query
    Search,
}

impl Prompt {
    /// Returns the prompt character.
    pub fn symbol(&self) -> char {
        match self {
            Prompt::Ex => ':',
            Prompt::Search => '/',
        }
    }
}

/// The line typed in Command mode.
#[derive(Debug, Clone, Default)]
struct CommandLine {
    prompt: Prompt,
    text: String,
}

/// The editor state.
///
/// ## Thread Safety
///
/// `Editor` is owned by a single thread and mutated only through
/// `&mut self`, one key at a time.
pub struct Editor {
    /// The document being edited
    document: Document,

    /// Current mode
    mode: EditorMode,

    /// Normal-mode key bindings and pending keys
    keymap: Keymap,

    /// Command-mode input
    command_line: CommandLine,

    /// Single-line clipboard
    clipboard: Option<String>,

    /// Search state
    search: SearchEngine,

    /// Keywords for the current file type
    keywords: KeywordSet,

    /// One-line status message
    status: String,

    /// Where documents are loaded from and saved to
    store: Box<dyn FileStore>,

    /// Editor configuration
    config: Config,

    /// Event bus for notifications
    event_bus: EventBus,

    /// Whether the editor should quit
    should_quit: bool,
}

impl Editor {
    /// Creates an editor with the default configuration.
    pub fn new(store: Box<dyn FileStore>) -> Self {
        Self::with_config(Config::default(), store)
    }

    /// Creates an editor with custom configuration.
    pub fn with_config(config: Config, store: Box<dyn FileStore>) -> Self {
        let keymap = Keymap::from_config(&config);
        let document = Document::new(config.editor.undo_limit);
        let keywords = keywords_for(&config, None);
        Self {
            document,
            mode: EditorMode::default(),
            keymap,
            command_line: CommandLine::default(),
            clipboard: None,
            search: SearchEngine::new(),
            keywords,
            status: String::new(),
            store,
            config,
            event_bus: EventBus::new(),
            should_quit: false,
        }
    }

    // ==================== Accessors ====================

    /// Returns the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the current mode.
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the status message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the clipboard content.
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Returns the search state.
    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    /// Returns the active keyword set.
    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Returns the keymap.
    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns true once a quit command ran.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Subscribes to editor events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<EditorEvent> {
        self.event_bus.subscribe()
    }

    /// Sets the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Builds the frame the terminal draws next.
    pub fn view(&self) -> View<'_> {
        let prompt = (self.mode == EditorMode::Command)
            .then(|| (self.command_line.prompt.symbol(), self.command_line.text.as_str()));
        View::new(
            self.document.buffer().as_slice(),
            self.document.cursor(),
            self.mode,
            &self.status,
            prompt,
            self.document.name(),
            self.document.is_modified(),
            &self.keywords,
        )
    }

    // ==================== Files ====================

    /// Loads a file, replacing the current document.
    ///
    /// On failure the current document is left untouched.
    pub fn open(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        let lines = self.store.load(path)?;
        let count = lines.len();
        self.install(Document::open(path, lines, self.config.editor.undo_limit));
        self.status = format!("\"{}\" {}L", self.document.name(), count);
        Ok(())
    }

    /// Loads a file, or starts an empty buffer bound to `path` when the
    /// file does not exist yet.
    pub fn open_or_create(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        match self.open(path) {
            Err(CoreError::Store(StoreError::NotFound(_))) => {
                tracing::info!("Starting new file {}", path.display());
                self.install(Document::open(path, Vec::new(), self.config.editor.undo_limit));
                self.status = format!("\"{}\" [New File]", self.document.name());
                Ok(())
            }
            other => other,
        }
    }

    fn install(&mut self, document: Document) {
        self.keywords = keywords_for(&self.config, document.extension());
        self.document = document;
        self.keymap.clear_pending();
        self.emit(EditorEvent::DocumentOpened(
            self.document.path().map(Path::to_path_buf),
        ));
    }

    /// Saves the document to its path.
    pub fn save(&mut self) -> CoreResult<()> {
        let path = self
            .document
            .path()
            .map(Path::to_path_buf)
            .ok_or(CoreError::NoFileName)?;
        self.write_to(path)
    }

    /// Saves the document to a new path and binds it there.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> CoreResult<()> {
        let path = path.into();
        self.write_to(path.clone())?;
        self.document.set_path(path);
        self.keywords = keywords_for(&self.config, self.document.extension());
        Ok(())
    }

    fn write_to(&mut self, path: PathBuf) -> CoreResult<()> {
        let lines = self.document.buffer().as_slice();
        let count = lines.len();
        if let Err(e) = self.store.save(&path, lines) {
            tracing::warn!("Save failed: {}", e);
            return Err(e.into());
        }
        self.document.mark_saved();
        self.status = format!("\"{}\" {}L written", path.display(), count);
        self.emit(EditorEvent::DocumentSaved(path));
        Ok(())
    }

    /// Ends the run loop.
    pub fn quit(&mut self) {
        self.should_quit = true;
        self.emit(EditorEvent::Quit);
    }

    // ==================== Key dispatch ====================

    /// Processes one key in the current mode.
    ///
    /// Failures never change the mode or the buffer; they become the status
    /// message.
    pub fn handle_key(&mut self, key: Key) {
        let result = match self.mode {
            EditorMode::Normal => self.handle_normal_key(key),
            EditorMode::Insert => self.handle_insert_key(key),
            EditorMode::Command => self.handle_command_key(key),
        };

        if let Err(e) = result {
            tracing::debug!("Key {} failed: {}", key, e);
            self.status = e.to_string();
        }
    }

    fn handle_normal_key(&mut self, key: Key) -> CoreResult<()> {
        if key == Key::Escape {
            self.keymap.clear_pending();
            return Ok(());
        }

        match self.keymap.process(key) {
            KeymapResult::Match(command) => self.execute(command),
            KeymapResult::Pending => Ok(()),
            KeymapResult::NoMatch => {
                tracing::debug!("No binding for {}", key);
                Ok(())
            }
        }
    }

    fn handle_insert_key(&mut self, key: Key) -> CoreResult<()> {
        match key {
            Key::Escape => self.set_mode(EditorMode::Normal),
            Key::Backspace | Key::Delete => {
                if self.document.delete_char_before()? {
                    self.emit(EditorEvent::DocumentChanged);
                }
            }
            Key::Enter => {
                self.document.split_line()?;
                self.emit(EditorEvent::DocumentChanged);
            }
            Key::Left => self.move_cursor(-1, 0),
            Key::Down => self.move_cursor(0, 1),
            Key::Up => self.move_cursor(0, -1),
            Key::Right => self.move_cursor(1, 0),
            _ => {
                if let Some(ch) = key.printable() {
                    self.document.insert_char(ch)?;
                    self.emit(EditorEvent::DocumentChanged);
                }
            }
        }
        Ok(())
    }

    fn handle_command_key(&mut self, key: Key) -> CoreResult<()> {
        match key {
            Key::Escape => {
                self.command_line.text.clear();
                self.set_mode(EditorMode::Normal);
            }
            Key::Backspace | Key::Delete => {
                if self.command_line.text.pop().is_none() {
                    self.set_mode(EditorMode::Normal);
                }
            }
            Key::Enter => {
                let line = std::mem::take(&mut self.command_line.text);
                self.set_mode(EditorMode::Normal);
                return match self.command_line.prompt {
                    Prompt::Ex => self.run_ex(&line),
                    Prompt::Search => self.search_from_cursor(&line),
                };
            }
            _ => {
                if let Some(ch) = key.printable() {
                    self.command_line.text.push(ch);
                }
            }
        }
        Ok(())
    }

    /// Executes a Normal-mode command.
    pub fn execute(&mut self, command: Command) -> CoreResult<()> {
        tracing::debug!("Executing {}", command.display_name());

        match command {
            Command::MoveLeft => self.move_cursor(-1, 0),
            Command::MoveDown => self.move_cursor(0, 1),
            Command::MoveUp => self.move_cursor(0, -1),
            Command::MoveRight => self.move_cursor(1, 0),
            Command::WordForward => {
                self.document.word_forward()?;
                self.emit(EditorEvent::CursorMoved);
            }
            Command::WordBackward => {
                self.document.word_backward()?;
                self.emit(EditorEvent::CursorMoved);
            }

            Command::DeleteWord => {
                self.document.delete_to_next_word()?;
                self.emit(EditorEvent::DocumentChanged);
            }
            Command::ChangeWord => {
                self.document.delete_to_next_word()?;
                self.emit(EditorEvent::DocumentChanged);
                self.set_mode(EditorMode::Insert);
            }
            Command::DeleteLine => {
                let line = self.document.cut_line()?;
                self.clipboard = Some(line);
                self.emit(EditorEvent::DocumentChanged);
            }
            Command::YankLine => {
                self.clipboard = Some(self.document.yank_line()?);
                self.status = "1 line yanked".to_string();
            }
            Command::PasteAfter | Command::PasteBefore => {
                let Some(line) = self.clipboard.clone() else {
                    self.status = "Nothing to paste".to_string();
                    return Ok(());
                };
                self.document
                    .paste_line(&line, command == Command::PasteAfter)?;
                self.emit(EditorEvent::DocumentChanged);
            }
            Command::Undo => {
                if self.document.undo()? {
                    self.emit(EditorEvent::DocumentChanged);
                } else {
                    self.status = "Already at oldest change".to_string();
                }
            }
            Command::Redo => {
                if self.document.redo()? {
                    self.emit(EditorEvent::DocumentChanged);
                } else {
                    self.status = "Already at newest change".to_string();
                }
            }

            Command::SearchPrompt => self.open_command_line(Prompt::Search),
            Command::SearchNext => {
                let pos = self
                    .search
                    .repeat_forward(self.document.buffer(), self.document.cursor())?;
                self.jump_to(pos);
            }
            Command::SearchPrevious => {
                let pos = self
                    .search
                    .repeat_backward(self.document.buffer(), self.document.cursor())?;
                self.jump_to(pos);
            }

            Command::EnterInsertMode => self.set_mode(EditorMode::Insert),
            Command::EnterCommandMode => self.open_command_line(Prompt::Ex),

            Command::Write => self.save()?,
            Command::Quit => self.quit(),
            Command::WriteQuit => {
                self.save()?;
                self.quit();
            }
        }
        Ok(())
    }

    /// Parses and runs a `:` command line.
    pub fn run_ex(&mut self, line: &str) -> CoreResult<()> {
        let command = ExCommand::parse(line)?;
        tracing::debug!("Running :{}", line);

        match command {
            ExCommand::Write(None) => self.save(),
            ExCommand::Write(Some(path)) => self.save_as(path),
            ExCommand::Quit => {
                self.quit();
                Ok(())
            }
            ExCommand::WriteQuit => {
                self.save()?;
                self.quit();
                Ok(())
            }
            ExCommand::Undo => self.execute(Command::Undo),
            ExCommand::Redo => self.execute(Command::Redo),
            ExCommand::Search(None) => {
                self.open_command_line(Prompt::Search);
                Ok(())
            }
            ExCommand::Search(Some(query)) => self.search_from_cursor(&query),
            ExCommand::Substitute { find, replace } => {
                let count = self.document.replace_all(&find, &replace)?;
                if count == 0 {
                    return Err(SearchError::NotFound(find).into());
                }
                self.status = format!("{} substitution{}", count, if count == 1 { "" } else { "s" });
                self.emit(EditorEvent::DocumentChanged);
                Ok(())
            }
            ExCommand::Edit(path) => self.open(path),
        }
    }

    /// Searches forward for `query`, starting at the cursor.
    ///
    /// A match under the cursor counts; `n` is what moves past it.
    pub fn search_from_cursor(&mut self, query: &str) -> CoreResult<()> {
        let pos = self.search.search_forward(
            self.document.buffer(),
            query,
            self.document.cursor(),
        )?;
        self.jump_to(pos);
        Ok(())
    }

    // ==================== Helpers ====================

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        self.document.move_by(dx, dy);
        self.emit(EditorEvent::CursorMoved);
    }

    fn jump_to(&mut self, pos: Position) {
        self.document.move_to(pos);
        self.status = self
            .search
            .last_query()
            .map(|q| format!("/{}", q))
            .unwrap_or_default();
        self.emit(EditorEvent::CursorMoved);
    }

    fn open_command_line(&mut self, prompt: Prompt) {
        self.command_line = CommandLine {
            prompt,
            text: String::new(),
        };
        self.set_mode(EditorMode::Command);
    }

    fn set_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.keymap.clear_pending();
        self.status = match mode {
            EditorMode::Command => String::new(),
            _ => format!("-- {} --", mode.as_str()),
        };
        self.emit(EditorEvent::ModeChanged(mode));
    }

    fn emit(&self, event: EditorEvent) {
        self.event_bus.emit(event);
    }
}

/// Picks the keyword set for an extension, honoring the highlight config.
fn keywords_for(config: &Config, extension: Option<&str>) -> KeywordSet {
    if !config.highlight.enabled {
        return KeywordSet::empty();
    }
    let Some(ext) = extension else {
        return KeywordSet::empty();
    };

    let mut set = KeywordSet::for_extension(ext);
    if let Some(extra) = config.highlight.keywords.get(ext) {
        set.extend(extra.iter().cloned());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::drain;
    use crate::store::{FsStore, MemoryStore};

    fn editor_with(lines: &[&str]) -> Editor {
        let store = MemoryStore::new().with_file("test.txt", lines);
        let mut editor = Editor::new(Box::new(store));
        editor.open("test.txt").unwrap();
        editor
    }

    fn press(editor: &mut Editor, keys: &str) {
        for ch in keys.chars() {
            editor.handle_key(Key::Char(ch));
        }
    }

    fn command(editor: &mut Editor, line: &str) {
        press(editor, ":");
        press(editor, line);
        editor.handle_key(Key::Enter);
    }

    fn lines(editor: &Editor) -> Vec<String> {
        editor.document().buffer().as_slice().to_vec()
    }

    #[test]
    fn test_cut_line_then_undo() {
        let mut editor = editor_with(&["abc", "def"]);
        press(&mut editor, "dd");
        assert_eq!(lines(&editor), ["def"]);
        assert_eq!(editor.clipboard(), Some("abc"));

        press(&mut editor, "u");
        assert_eq!(lines(&editor), ["abc", "def"]);
        assert!(editor.document().cursor().line < 2);
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let mut editor = editor_with(&["foo foo", "xfoox"]);
        command(&mut editor, "s/foo/bar");
        assert_eq!(lines(&editor), ["bar bar", "xbarx"]);
        assert_eq!(editor.status(), "3 substitutions");
        assert_eq!(editor.mode(), EditorMode::Normal);

        command(&mut editor, "u");
        assert_eq!(lines(&editor), ["foo foo", "xfoox"]);
    }

    #[test]
    fn test_substitute_without_match() {
        let mut editor = editor_with(&["abc"]);
        command(&mut editor, "s/zzz/y");
        assert_eq!(editor.status(), "Pattern not found: zzz");
        assert!(!editor.document().is_modified());
    }

    #[test]
    fn test_abandoned_multi_key_command() {
        let mut editor = editor_with(&["foo bar"]);
        press(&mut editor, "cj");
        assert_eq!(lines(&editor), ["foo bar"]);
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert!(!editor.keymap().is_pending());

        press(&mut editor, "dx");
        assert_eq!(lines(&editor), ["foo bar"]);
        assert!(!editor.document().history().can_undo());
    }

    #[test]
    fn test_change_word() {
        let mut editor = editor_with(&["foo bar"]);
        press(&mut editor, "cw");
        assert_eq!(lines(&editor), ["bar"]);
        assert_eq!(editor.mode(), EditorMode::Insert);

        press(&mut editor, "baz ");
        editor.handle_key(Key::Escape);
        assert_eq!(lines(&editor), ["baz bar"]);
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert_eq!(editor.status(), "-- NORMAL --");
    }

    #[test]
    fn test_delete_word_with_x_and_dw() {
        let mut editor = editor_with(&["one two three"]);
        press(&mut editor, "x");
        assert_eq!(lines(&editor), ["two three"]);
        press(&mut editor, "dw");
        assert_eq!(lines(&editor), ["three"]);
    }

    #[test]
    fn test_undo_redo_are_inverses() {
        let mut editor = editor_with(&["ac"]);
        press(&mut editor, "li");
        press(&mut editor, "b");
        editor.handle_key(Key::Escape);
        assert_eq!(lines(&editor), ["abc"]);

        press(&mut editor, "u");
        assert_eq!(lines(&editor), ["ac"]);
        editor.handle_key(Key::Ctrl('r'));
        assert_eq!(lines(&editor), ["abc"]);

        editor.handle_key(Key::Ctrl('r'));
        assert_eq!(editor.status(), "Already at newest change");
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut editor = editor_with(&["abc", "def"]);
        press(&mut editor, "ddu");
        press(&mut editor, "x");
        editor.handle_key(Key::Ctrl('r'));
        assert_eq!(lines(&editor), ["", "def"]);
        assert!(!editor.document().history().can_redo());
    }

    #[test]
    fn test_insert_mode_keys() {
        let mut editor = editor_with(&["ab", "cd"]);
        press(&mut editor, "ji");
        editor.handle_key(Key::Backspace);
        assert_eq!(lines(&editor), ["ab", "cd"]);

        editor.handle_key(Key::Right);
        editor.handle_key(Key::Enter);
        assert_eq!(lines(&editor), ["ab", "c", "d"]);
        assert_eq!(editor.document().cursor(), Position::new(2, 0));

        editor.handle_key(Key::Tab);
        assert_eq!(lines(&editor)[2], "\td");
        editor.handle_key(Key::Delete);
        assert_eq!(lines(&editor)[2], "d");
    }

    #[test]
    fn test_yank_and_paste() {
        let mut editor = editor_with(&["one", "two"]);
        press(&mut editor, "p");
        assert_eq!(editor.status(), "Nothing to paste");

        press(&mut editor, "yyp");
        assert_eq!(lines(&editor), ["one", "one", "two"]);
        press(&mut editor, "jP");
        assert_eq!(lines(&editor), ["one", "one", "one", "two"]);
        assert_eq!(editor.document().cursor(), Position::new(2, 0));
    }

    #[test]
    fn test_search_prompt_and_repeat() {
        let mut editor = editor_with(&["foo bar", "bar baz"]);
        press(&mut editor, "/bar");
        assert_eq!(editor.view().status_text(), "/bar");
        editor.handle_key(Key::Enter);
        assert_eq!(editor.document().cursor(), Position::new(0, 4));

        press(&mut editor, "n");
        assert_eq!(editor.document().cursor(), Position::new(1, 0));

        press(&mut editor, "n");
        assert_eq!(editor.status(), "Pattern not found: bar");
        assert_eq!(editor.document().cursor(), Position::new(1, 0));

        press(&mut editor, "N");
        assert_eq!(editor.document().cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_search_matches_under_cursor() {
        let mut editor = editor_with(&["int main() {", "return 0;"]);
        press(&mut editor, "/int");
        editor.handle_key(Key::Enter);
        assert_eq!(editor.status(), "/int");
        assert_eq!(editor.document().cursor(), Position::ZERO);

        press(&mut editor, "n");
        assert_eq!(editor.status(), "Pattern not found: int");

        command(&mut editor, "/int");
        assert_eq!(editor.status(), "/int");
        assert_eq!(editor.document().cursor(), Position::ZERO);

        press(&mut editor, "jl/0");
        editor.handle_key(Key::Enter);
        assert_eq!(editor.document().cursor(), Position::new(1, 7));
    }

    #[test]
    fn test_cut_last_line_then_paste() {
        let mut editor = editor_with(&["one", "two", "three"]);
        press(&mut editor, "jjdd");
        assert_eq!(lines(&editor), ["one", "two"]);
        assert_eq!(editor.document().cursor(), Position::new(1, 0));

        press(&mut editor, "p");
        assert_eq!(lines(&editor), ["one", "two", "three"]);
        assert_eq!(editor.document().cursor(), Position::new(2, 0));

        press(&mut editor, "ddP");
        assert_eq!(lines(&editor), ["one", "three", "two"]);
        assert_eq!(editor.document().cursor(), Position::new(1, 0));

        press(&mut editor, "uuuu");
        assert_eq!(lines(&editor), ["one", "two", "three"]);
        assert!(!editor.document().history().can_undo());
    }

    #[test]
    fn test_configured_binding_drives_editor() {
        let mut config = Config::default();
        config
            .keyboard
            .bindings
            .insert("Z Z".to_string(), "write_quit".to_string());
        config
            .keyboard
            .bindings
            .insert("Q".to_string(), "no_such_command".to_string());
        let store = MemoryStore::new().with_file("test.txt", &["abc"]);
        let mut editor = Editor::with_config(config, Box::new(store));
        editor.open("test.txt").unwrap();

        press(&mut editor, "Q");
        assert!(!editor.should_quit());

        press(&mut editor, "xZZ");
        assert!(editor.should_quit());
        assert!(!editor.document().is_modified());
    }

    #[test]
    fn test_repeat_without_query() {
        let mut editor = editor_with(&["abc"]);
        press(&mut editor, "n");
        assert_eq!(editor.status(), "No previous search pattern");
    }

    #[test]
    fn test_command_line_editing() {
        let mut editor = editor_with(&["abc"]);
        press(&mut editor, ":qq");
        editor.handle_key(Key::Backspace);
        assert_eq!(editor.view().status_text(), ":q");
        editor.handle_key(Key::Escape);
        assert_eq!(editor.mode(), EditorMode::Normal);
        assert!(!editor.should_quit());

        press(&mut editor, ":");
        editor.handle_key(Key::Backspace);
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_unknown_command() {
        let mut editor = editor_with(&["abc"]);
        command(&mut editor, "foo");
        assert_eq!(editor.status(), "Not an editor command: foo");
        assert_eq!(editor.mode(), EditorMode::Normal);
    }

    #[test]
    fn test_quit() {
        let mut editor = editor_with(&["abc"]);
        press(&mut editor, "x");
        command(&mut editor, "q");
        assert!(editor.should_quit());
    }

    #[test]
    fn test_failed_open_leaves_buffer() {
        let mut editor = editor_with(&["keep me"]);
        press(&mut editor, "x");
        command(&mut editor, "e missing.txt");

        assert!(editor.status().starts_with("File not found"));
        assert_eq!(lines(&editor), ["me"]);
        assert_eq!(editor.document().name(), "test.txt");
        assert!(editor.document().history().can_undo());
    }

    #[test]
    fn test_open_or_create() {
        let mut editor = Editor::new(Box::new(MemoryStore::new()));
        editor.open_or_create("new.rs").unwrap();
        assert!(editor.document().buffer().is_blank());
        assert_eq!(editor.document().name(), "new.rs");
        assert_eq!(editor.keywords().language(), Some("rust"));
        assert_eq!(editor.status(), "\"new.rs\" [New File]");
    }

    #[test]
    fn test_write_without_name() {
        let mut editor = Editor::new(Box::new(MemoryStore::new()));
        command(&mut editor, "w");
        assert_eq!(editor.status(), "No file name");
    }

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let mut editor = Editor::new(Box::new(FsStore::new()));
        press(&mut editor, "i");
        press(&mut editor, "hello");
        editor.handle_key(Key::Escape);
        command(&mut editor, &format!("w {}", path.display()));

        assert!(!editor.document().is_modified());
        assert_eq!(editor.document().name(), "out.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");

        press(&mut editor, "dd");
        command(&mut editor, &format!("e {}", path.display()));
        assert_eq!(lines(&editor), ["hello"]);
        assert!(!editor.document().history().can_undo());
    }

    #[test]
    fn test_write_quit_on_failure_stays() {
        let mut store = MemoryStore::new().with_file("ro.txt", &["x"]);
        store.set_read_only(true);
        let mut editor = Editor::new(Box::new(store));
        editor.open("ro.txt").unwrap();

        command(&mut editor, "wq");
        assert!(!editor.should_quit());
        assert!(editor.status().starts_with("Cannot write"));
    }

    #[test]
    fn test_keywords_follow_extension_and_config() {
        let store = MemoryStore::new()
            .with_file("main.cpp", &["int main() {", "return 0;", "}"])
            .with_file("notes.txt", &["int"]);
        let mut config = Config::default();
        config
            .highlight
            .keywords
            .insert("cpp".to_string(), vec!["main".to_string()]);
        let mut editor = Editor::with_config(config, Box::new(store));

        editor.open("main.cpp").unwrap();
        let spans: Vec<_> = editor.view().spans(0).collect();
        assert!(spans[0].is_keyword());
        assert!(spans[2].is_keyword());

        editor.open("notes.txt").unwrap();
        assert!(editor.keywords().is_empty());
    }

    #[test]
    fn test_highlight_disabled() {
        let store = MemoryStore::new().with_file("main.c", &["int x;"]);
        let mut config = Config::default();
        config.highlight.enabled = false;
        let mut editor = Editor::with_config(config, Box::new(store));
        editor.open("main.c").unwrap();
        assert!(editor.keywords().is_empty());
    }

    #[test]
    fn test_events() {
        let mut editor = editor_with(&["abc"]);
        let mut rx = editor.subscribe();

        press(&mut editor, "ix");
        editor.handle_key(Key::Escape);

        assert_eq!(
            drain(&mut rx),
            vec![
                EditorEvent::ModeChanged(EditorMode::Insert),
                EditorEvent::DocumentChanged,
                EditorEvent::ModeChanged(EditorMode::Normal),
            ]
        );
    }
}
