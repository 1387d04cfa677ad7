//! Editor notifications.
//!
//! ## Learning: Channels instead of Callbacks
//!
//! Registering observer callbacks would mean storing borrowed closures
//! inside the editor. A `tokio::sync::broadcast` channel sidesteps that:
//! the editor sends owned `EditorEvent` values, and every receiver gets
//! its own clone of each one.
//!
//! The editor itself is synchronous. It only ever calls `send`, and the
//! terminal adapter drains its receiver with `try_recv` once per frame, so
//! no runtime is needed outside of tests.

use std::path::PathBuf;

use tokio::sync::broadcast;

use crate::editor::EditorMode;

/// Something the front end may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A file was loaded (None for an untitled buffer)
    DocumentOpened(Option<PathBuf>),
    /// The buffer was written to this path
    DocumentSaved(PathBuf),
    /// The buffer content changed
    DocumentChanged,
    /// The cursor moved without an edit
    CursorMoved,
    /// The editor switched modes
    ModeChanged(EditorMode),
    /// The editor is quitting
    Quit,
}

/// Broadcast sender shared by the editor.
///
/// Lagged receivers don't block senders; they skip the oldest events.
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: EditorEvent) {
        // No receivers is fine
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Takes every event currently queued on `receiver` without blocking.
pub fn drain(receiver: &mut broadcast::Receiver<EditorEvent>) -> Vec<EditorEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                tracing::warn!("Event receiver lagged, missed {} events", n);
            }
            Err(_) => break,
        }
    }
    events
}
