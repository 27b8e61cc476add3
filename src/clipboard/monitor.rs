//! clipwatch - Pasteboard polling watcher
//!
//! Samples the clipboard change version on a fixed timer and pushes one
//! classified event to the sink per detected change

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

use super::access::ClipboardAccess;
use super::classify::classify;
use super::sink::EventSink;

/// Fixed polling interval. Clipboard changes are human-paced; 100ms keeps
/// detection prompt without measurable CPU cost.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// The poll timer could not be armed: `start` was called without a
    /// tokio runtime to drive it.
    #[error("no async runtime available to drive the poll timer")]
    TimerCreation,
}

enum WatcherState {
    Stopped,
    Running { timer: AbortHandle },
}

/// Clipboard watcher.
///
/// Created stopped. `start` arms the poll timer, `stop` disarms it; both
/// return immediately. All clipboard inspection happens on the timer task.
pub struct ClipboardWatcher {
    clipboard: Arc<dyn ClipboardAccess>,
    sink: Arc<dyn EventSink>,
    temp_dir: PathBuf,
    /// Last observed change version; `None` until the first successful read
    last_version: Arc<Mutex<Option<u64>>>,
    /// Whether ticks are skipped (used when the caller writes to the clipboard)
    paused: Arc<AtomicBool>,
    state: Mutex<WatcherState>,
}

impl ClipboardWatcher {
    /// Create a new watcher. Image events are materialized into the OS
    /// temp directory.
    pub fn new(clipboard: Arc<dyn ClipboardAccess>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            clipboard,
            sink,
            temp_dir: std::env::temp_dir(),
            last_version: Arc::new(Mutex::new(None)),
            paused: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(WatcherState::Stopped),
        }
    }

    /// Override where image files are written
    pub fn with_temp_dir(mut self, temp_dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = temp_dir.into();
        self
    }

    /// Arm the poll timer.
    ///
    /// Idempotent: calling `start` while running replaces the existing
    /// timer, so a single change never produces more than one event.
    pub fn start(&self) -> Result<(), WatchError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| WatchError::TimerCreation)?;

        let mut state = self.state.lock();
        if let WatcherState::Running { timer } = &*state {
            log::warn!("Clipboard watcher already running, re-arming timer");
            timer.abort();
        }

        let task = runtime.spawn(Self::poll_loop(
            Arc::clone(&self.clipboard),
            Arc::clone(&self.sink),
            self.temp_dir.clone(),
            Arc::clone(&self.last_version),
            Arc::clone(&self.paused),
        ));
        *state = WatcherState::Running {
            timer: task.abort_handle(),
        };

        log::info!("Clipboard watcher started with {:?} interval", POLL_INTERVAL);
        Ok(())
    }

    /// Disarm the poll timer. A no-op when already stopped.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if let WatcherState::Running { timer } =
            std::mem::replace(&mut *state, WatcherState::Stopped)
        {
            timer.abort();
            log::info!("Clipboard watcher stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(&*self.state.lock(), WatcherState::Running { .. })
    }

    /// Skip ticks without disarming the timer
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    async fn poll_loop(
        clipboard: Arc<dyn ClipboardAccess>,
        sink: Arc<dyn EventSink>,
        temp_dir: PathBuf,
        last_version: Arc<Mutex<Option<u64>>>,
        paused: Arc<AtomicBool>,
    ) {
        let mut timer = tokio::time::interval(POLL_INTERVAL);
        // A slow classification delays the next tick rather than stacking fires
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;

            if paused.load(Ordering::SeqCst) {
                continue;
            }

            Self::tick(&*clipboard, &*sink, &temp_dir, &last_version);
        }
    }

    /// One poll: compare the clipboard version against the recorded baseline
    /// and classify on advance.
    ///
    /// The baseline is updated before classification runs, so a failed
    /// classification never replays the same change on the next tick.
    fn tick(
        clipboard: &dyn ClipboardAccess,
        sink: &dyn EventSink,
        temp_dir: &Path,
        last_version: &Mutex<Option<u64>>,
    ) {
        let version = match clipboard.version() {
            Ok(v) => v,
            Err(e) => {
                // Transient; retry on the next tick
                log::debug!("{}", e);
                return;
            }
        };

        let mut last = last_version.lock();
        if *last == Some(version) {
            return;
        }
        let primed = last.is_some();
        *last = Some(version);
        drop(last);

        // First successful read only establishes the baseline: content that
        // was already on the clipboard before watching is not a change.
        if !primed {
            return;
        }

        let event = classify(clipboard, temp_dir);
        log::debug!("Clipboard change detected: {}", event.kind());
        sink.on_clipboard_changed(event);
    }
}
