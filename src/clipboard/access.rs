//! clipwatch - Clipboard access abstraction
//!
//! The capability the watcher polls, plus the arboard-backed system adapter

use std::io::Cursor;

use arboard::Clipboard;
use parking_lot::Mutex;

/// A clipboard read failed; the watcher treats this as "no change this tick".
#[derive(Debug, thiserror::Error)]
#[error("clipboard read failed: {0}")]
pub struct ClipboardReadError(String);

impl ClipboardReadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Point-in-time access to the shared system clipboard.
///
/// `version` is an opaque counter that differs after every clipboard write;
/// it is not guaranteed to advance by 1. The watcher compares successive
/// versions to detect changes, so implementations only have to keep the
/// value stable between writes.
pub trait ClipboardAccess: Send + Sync {
    /// Current change version of the clipboard
    fn version(&self) -> Result<u64, ClipboardReadError>;

    /// Plain text content, if the clipboard currently holds any.
    /// An empty string is still "present".
    fn read_text(&self) -> Option<String>;

    /// Encoded image bytes, if the clipboard currently holds an image
    fn read_image(&self) -> Option<Vec<u8>>;
}

/// The real system clipboard, read through arboard.
///
/// arboard exposes no native change counter, so `version` derives one:
/// the current contents are digested and an internal counter is bumped
/// whenever the digest differs from the last read.
#[derive(Default)]
pub struct SystemClipboard {
    state: Mutex<VersionState>,
}

#[derive(Default)]
struct VersionState {
    counter: u64,
    last_digest: Option<blake3::Hash>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    // A fresh handle per call ensures we observe the latest contents
    fn open() -> Result<Clipboard, ClipboardReadError> {
        Clipboard::new().map_err(|e| ClipboardReadError::new(e.to_string()))
    }

    fn digest(clipboard: &mut Clipboard) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        if let Ok(text) = clipboard.get_text() {
            hasher.update(b"text:");
            hasher.update(text.as_bytes());
        }
        if let Ok(image) = clipboard.get_image() {
            hasher.update(b"image:");
            hasher.update(&(image.width as u64).to_le_bytes());
            hasher.update(&(image.height as u64).to_le_bytes());
            hasher.update(&image.bytes);
        }
        hasher.finalize()
    }
}

impl ClipboardAccess for SystemClipboard {
    fn version(&self) -> Result<u64, ClipboardReadError> {
        let mut clipboard = Self::open()?;
        let digest = Self::digest(&mut clipboard);

        let mut state = self.state.lock();
        if state.last_digest != Some(digest) {
            state.last_digest = Some(digest);
            state.counter = state.counter.wrapping_add(1);
        }
        Ok(state.counter)
    }

    fn read_text(&self) -> Option<String> {
        let mut clipboard = Self::open().ok()?;
        clipboard.get_text().ok()
    }

    fn read_image(&self) -> Option<Vec<u8>> {
        let mut clipboard = Self::open().ok()?;
        let image = clipboard.get_image().ok()?;
        rgba_to_png(&image)
    }
}

/// Convert arboard's raw RGBA data to encoded PNG bytes
fn rgba_to_png(image: &arboard::ImageData) -> Option<Vec<u8>> {
    use image::{ImageBuffer, Rgba};

    let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(
        image.width as u32,
        image.height as u32,
        image.bytes.to_vec(),
    )?;

    let mut png_data = Vec::new();
    let mut cursor = Cursor::new(&mut png_data);
    if let Err(e) = buffer.write_to(&mut cursor, image::ImageFormat::Png) {
        log::error!("Failed to write PNG data: {}", e);
        return None;
    }

    Some(png_data)
}
