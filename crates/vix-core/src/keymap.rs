//! Keyboard mapping for Normal mode.
//!
//! ## Learning: State Machines
//!
//! Key handling is a small state machine:
//! - Awaiting first key: a key either matches a binding, starts a longer
//!   sequence, or matches nothing
//! - Awaiting next key: the keys so far are kept in `pending`; the next key
//!   completes the sequence (`dd`, `dw`, `cw`, `yy`) or abandons it
//!
//! Because the pending keys live in the `Keymap` instead of inside a
//! blocking read, the machine can be driven one key at a time from tests.

use crate::command::Command;
use crate::config::Config;
use std::collections::HashMap;

/// A key code as delivered by the terminal port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Parses a key from a string like `"esc"`, `"ctrl+r"` or `"x"`.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "enter" | "return" => Some(Key::Enter),
            "tab" => Some(Key::Tab),
            "backspace" | "bs" => Some(Key::Backspace),
            "delete" | "del" => Some(Key::Delete),
            "escape" | "esc" => Some(Key::Escape),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "space" => Some(Key::Char(' ')),
            _ => {
                if let Some(rest) = lower.strip_prefix("ctrl+") {
                    let mut chars = rest.chars();
                    return match (chars.next(), chars.next()) {
                        (Some(ch), None) => Some(Key::Ctrl(ch)),
                        _ => None,
                    };
                }
                // Single characters keep their case: `p` and `P` differ.
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Key::Char(ch)),
                    _ => None,
                }
            }
        }
    }

    /// Parses a whitespace-separated key sequence like `"d d"`.
    pub fn parse_sequence(s: &str) -> Option<Vec<Self>> {
        let keys: Option<Vec<Key>> = s.split_whitespace().map(Key::parse).collect();
        keys.filter(|keys| !keys.is_empty())
    }

    /// Returns the character a key inserts in Insert or Command mode.
    pub fn printable(&self) -> Option<char> {
        match self {
            Key::Char(ch) if !ch.is_control() => Some(*ch),
            Key::Tab => Some('\t'),
            _ => None,
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Ctrl(c) => write!(f, "Ctrl+{}", c.to_ascii_uppercase()),
            Key::Enter => write!(f, "Enter"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Escape => write!(f, "Escape"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
        }
    }
}

/// A key binding maps a key sequence to a command.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The key sequence (more than one key for operator commands).
    pub keys: Vec<Key>,
    /// The command to execute.
    pub command: Command,
}

impl KeyBinding {
    /// Creates a binding.
    pub fn new(keys: Vec<Key>, command: Command) -> Self {
        Self { keys, command }
    }
}

/// Normal-mode keyboard mapping.
pub struct Keymap {
    /// All key bindings.
    bindings: Vec<KeyBinding>,
    /// Index by first key for fast lookup.
    by_key: HashMap<Key, Vec<usize>>,
    /// Keys read so far for an incomplete sequence.
    pending: Vec<Key>,
}

impl Keymap {
    /// Creates a new keymap with default bindings.
    pub fn new() -> Self {
        let mut keymap = Self {
            bindings: Vec::new(),
            by_key: HashMap::new(),
            pending: Vec::new(),
        };
        keymap.add_default_bindings();
        keymap.rebuild_index();
        keymap
    }

    /// Creates a keymap from configuration.
    ///
    /// User bindings are added after the defaults and take precedence when
    /// they bind the same sequence.
    pub fn from_config(config: &Config) -> Self {
        let mut keymap = Self::new();

        for (key_str, cmd_str) in &config.keyboard.bindings {
            match (Key::parse_sequence(key_str), Command::from_name(cmd_str)) {
                (Some(keys), Some(cmd)) => {
                    keymap.bindings.retain(|b| b.keys != keys);
                    keymap.bindings.push(KeyBinding::new(keys, cmd));
                }
                _ => tracing::warn!("Ignoring key binding {:?} = {:?}", key_str, cmd_str),
            }
        }

        keymap.rebuild_index();
        keymap
    }

    /// Adds default key bindings.
    fn add_default_bindings(&mut self) {
        use crate::command::Command::*;
        use Key::{Char, Ctrl, Down, Left, Right, Up};

        let bindings = [
            // Motions
            (vec![Char('h')], MoveLeft),
            (vec![Left], MoveLeft),
            (vec![Char('j')], MoveDown),
            (vec![Down], MoveDown),
            (vec![Char('k')], MoveUp),
            (vec![Up], MoveUp),
            (vec![Char('l')], MoveRight),
            (vec![Right], MoveRight),
            (vec![Char('w')], WordForward),
            (vec![Char('b')], WordBackward),
            // Edits
            (vec![Char('x')], DeleteWord),
            (vec![Char('d'), Char('w')], DeleteWord),
            (vec![Char('d'), Char('d')], DeleteLine),
            (vec![Char('c'), Char('w')], ChangeWord),
            (vec![Char('y'), Char('y')], YankLine),
            (vec![Char('p')], PasteAfter),
            (vec![Char('P')], PasteBefore),
            (vec![Char('u')], Undo),
            (vec![Ctrl('r')], Redo),
            // Search
            (vec![Char('/')], SearchPrompt),
            (vec![Char('n')], SearchNext),
            (vec![Char('N')], SearchPrevious),
            // Modes
            (vec![Char('i')], EnterInsertMode),
            (vec![Char(':')], EnterCommandMode),
        ];

        for (keys, command) in bindings {
            self.bindings.push(KeyBinding::new(keys, command));
        }
    }

    /// Rebuilds the key index.
    fn rebuild_index(&mut self) {
        self.by_key.clear();
        for (i, binding) in self.bindings.iter().enumerate() {
            if let Some(first_key) = binding.keys.first() {
                self.by_key.entry(*first_key).or_default().push(i);
            }
        }
    }

    /// Processes a key press.
    ///
    /// A key that cannot continue the pending sequence abandons it; the key
    /// is consumed and nothing is executed.
    pub fn process(&mut self, key: Key) -> KeymapResult {
        self.pending.push(key);

        let indices = match self.by_key.get(&self.pending[0]) {
            Some(v) => v.clone(),
            None => {
                self.pending.clear();
                return KeymapResult::NoMatch;
            }
        };

        let mut exact_match = None;
        let mut prefix_match = false;

        for i in indices {
            let binding = &self.bindings[i];

            if binding.keys == self.pending {
                exact_match = Some(binding.command);
            } else if binding.keys.len() > self.pending.len()
                && binding.keys[..self.pending.len()] == self.pending[..]
            {
                prefix_match = true;
            }
        }

        if let Some(cmd) = exact_match {
            self.pending.clear();
            return KeymapResult::Match(cmd);
        }

        if prefix_match {
            return KeymapResult::Pending;
        }

        self.pending.clear();
        KeymapResult::NoMatch
    }

    /// Clears pending keys.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Returns true if waiting for more keys.
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of processing a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapResult {
    /// A command was matched.
    Match(Command),
    /// Waiting for more keys.
    Pending,
    /// No binding matches.
    NoMatch,
}
