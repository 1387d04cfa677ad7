//! # Vix Core
//!
//! Modal editing logic and state management.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Editor                           │
//! │  ┌──────────┐ ┌──────────┐ ┌──────────────┐ ┌──────────┐ │
//! │  │  Keymap  │ │  Config  │ │ SearchEngine │ │ EventBus │ │
//! │  └──────────┘ └──────────┘ └──────────────┘ └──────────┘ │
//! │        │                                                 │
//! │  ┌─────┴───────────────────────────────┐  ┌───────────┐  │
//! │  │ Document: TextBuffer+cursor+History │  │ FileStore │  │
//! │  └─────────────────────────────────────┘  └───────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!              ▲ handle_key            │ view
//!              │                       ▼
//!          ┌──────────────────────────────────┐
//!          │        Terminal (adapter)         │
//!          └──────────────────────────────────┘
//! ```
//!
//! ## Learning: Module Organization
//!
//! Rust modules map to files:
//! - `mod foo;` looks for `foo.rs` or `foo/mod.rs`
//! - `pub use` re-exports items for cleaner public APIs

pub mod command;
pub mod config;
pub mod document;
pub mod editor;
pub mod event;
pub mod keymap;
pub mod search;
pub mod store;
pub mod terminal;

pub use command::{Command, CommandError, ExCommand};
pub use config::Config;
pub use document::Document;
pub use editor::{Editor, EditorMode, Prompt};
pub use event::{EditorEvent, EventBus};
pub use keymap::{Key, KeyBinding, Keymap, KeymapResult};
pub use search::{SearchEngine, SearchError};
pub use store::{FileStore, FsStore, MemoryStore, StoreError};
pub use terminal::{Terminal, View, run};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations.
///
/// Every variant displays as a one-line status message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Buffer(#[from] vix_buffer::BufferError),

    #[error("{0}")]
    Search(#[from] SearchError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("No file name")]
    NoFileName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_status_lines() {
        let err: CoreError = SearchError::NotFound("bar".to_string()).into();
        assert_eq!(err.to_string(), "Pattern not found: bar");

        let err: CoreError = CommandError::Unknown("zz".to_string()).into();
        assert_eq!(err.to_string(), "Not an editor command: zz");

        assert_eq!(CoreError::NoFileName.to_string(), "No file name");
    }
}
