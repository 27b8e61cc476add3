//! clipwatch - Clipboard module
//!
//! Provides clipboard access, change detection, and content classification

pub mod access;
pub(crate) mod classify;
pub mod models;
pub mod monitor;
pub mod sink;

pub use access::{ClipboardAccess, ClipboardReadError, SystemClipboard};
pub use models::ClipboardEvent;
pub use monitor::{ClipboardWatcher, WatchError, POLL_INTERVAL};
pub use sink::EventSink;
