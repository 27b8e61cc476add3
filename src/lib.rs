//! clipwatch - A system pasteboard change watcher
//!
//! Polls the shared OS clipboard for changes and reports each new piece of
//! content to a caller-supplied sink. Text is delivered inline. Images are
//! re-encoded as PNG into the temp directory and delivered by path. Anything
//! else is reported as an unknown change.
//!
//! ```no_run
//! use std::sync::Arc;
//! use clipwatch::{ClipboardWatcher, SystemClipboard};
//! use tokio::sync::mpsc;
//!
//! # async fn demo() -> Result<(), clipwatch::WatchError> {
//! let (tx, mut rx) = mpsc::unbounded_channel();
//! let watcher = ClipboardWatcher::new(Arc::new(SystemClipboard::new()), Arc::new(tx));
//!
//! watcher.start()?;
//! while let Some(event) = rx.recv().await {
//!     println!("clipboard changed: {}", event.kind());
//! }
//! # Ok(())
//! # }
//! ```

pub mod clipboard;

pub use clipboard::{
    ClipboardAccess, ClipboardEvent, ClipboardReadError, ClipboardWatcher, EventSink,
    SystemClipboard, WatchError, POLL_INTERVAL,
};
