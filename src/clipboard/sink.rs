//! clipwatch - Event notification sink
//!
//! Fire-and-forget delivery of clipboard events to the embedding caller

use tokio::sync::mpsc;

use super::models::ClipboardEvent;

/// Receives each detected clipboard change.
///
/// Delivery is one-way: the watcher never waits for a response, and a
/// sink that has gone away does not stop the polling loop.
pub trait EventSink: Send + Sync {
    fn on_clipboard_changed(&self, event: ClipboardEvent);
}

/// Channel sink: each event is a one-way message to the receiving side.
impl EventSink for mpsc::UnboundedSender<ClipboardEvent> {
    fn on_clipboard_changed(&self, event: ClipboardEvent) {
        if self.send(event).is_err() {
            log::debug!("Event receiver dropped, discarding clipboard event");
        }
    }
}
