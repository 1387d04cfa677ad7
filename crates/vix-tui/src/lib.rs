//! # Vix TUI
//!
//! Terminal front end for the vix editing core, built on crossterm.
//!
//! ## Architecture
//!
//! The core owns all state and knows nothing about terminals. This crate
//! supplies the two things it asks for:
//! - **Output**: [`CrosstermTerminal`] draws each `View` the core hands it
//! - **Input**: crossterm key events become `vix_core::Key`s
//!
//! plus the plumbing that only a real terminal needs: raw mode, the
//! alternate screen, and restoring both on exit or panic ([`TerminalGuard`]).

pub mod app;
pub mod guard;
pub mod input;
pub mod terminal;
pub mod theme;

pub use app::{Flags, run};
pub use guard::TerminalGuard;
pub use terminal::CrosstermTerminal;
pub use theme::Theme;
