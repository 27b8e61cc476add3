//! clipwatch - Content classification and materialization
//!
//! Turns the clipboard contents at a detected-change instant into exactly
//! one event, writing image payloads to disk instead of carrying them inline

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::access::ClipboardAccess;
use super::models::ClipboardEvent;

#[derive(Debug, thiserror::Error)]
enum MaterializeError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("temp file write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// Classify the current clipboard contents, first match wins.
///
/// Text takes priority over image: an OS may expose both representations of
/// the same copy, and text is cheap to carry inline. Image data is decoded,
/// re-encoded as PNG and written under `temp_dir`; the event then carries
/// the path. A decode or write failure degrades to `Unknown`: the change
/// was real, but the payload is unrecoverable.
pub(crate) fn classify(clipboard: &dyn ClipboardAccess, temp_dir: &Path) -> ClipboardEvent {
    if let Some(text) = clipboard.read_text() {
        return ClipboardEvent::Text(text);
    }

    if let Some(bytes) = clipboard.read_image() {
        match write_temp_png(&bytes, temp_dir) {
            Ok(path) => return ClipboardEvent::Image(path),
            Err(e) => log::warn!("Failed to materialize clipboard image: {}", e),
        }
    }

    ClipboardEvent::Unknown
}

/// Re-encode image bytes as PNG into a uniquely named temp file.
///
/// The file is never deleted by this crate; disposal is left to the OS
/// temp-directory policy or the caller.
fn write_temp_png(bytes: &[u8], temp_dir: &Path) -> Result<PathBuf, MaterializeError> {
    let decoded = image::load_from_memory(bytes)?;

    let mut png_data = Vec::new();
    let mut cursor = Cursor::new(&mut png_data);
    decoded.write_to(&mut cursor, image::ImageFormat::Png)?;

    let path = temp_dir.join(format!("{}.png", Uuid::new_v4()));
    fs::write(&path, &png_data)?;

    log::debug!(
        "Materialized clipboard image to {:?} ({} bytes)",
        path,
        png_data.len()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::access::ClipboardReadError;
    use image::{Rgba, RgbaImage};

    struct FakeContents {
        text: Option<String>,
        image: Option<Vec<u8>>,
    }

    impl ClipboardAccess for FakeContents {
        fn version(&self) -> Result<u64, ClipboardReadError> {
            Ok(1)
        }

        fn read_text(&self) -> Option<String> {
            self.text.clone()
        }

        fn read_image(&self) -> Option<Vec<u8>> {
            self.image.clone()
        }
    }

    fn red_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn text_wins_over_image() {
        let fake = FakeContents {
            text: Some("copied".to_string()),
            image: Some(red_png(4, 4)),
        };
        let event = classify(&fake, &std::env::temp_dir());
        assert_eq!(event, ClipboardEvent::Text("copied".to_string()));
    }

    #[test]
    fn empty_text_still_counts_as_text() {
        let fake = FakeContents {
            text: Some(String::new()),
            image: None,
        };
        let event = classify(&fake, &std::env::temp_dir());
        assert_eq!(event, ClipboardEvent::Text(String::new()));
    }

    #[test]
    fn image_materializes_to_png_with_original_dimensions() {
        let fake = FakeContents {
            text: None,
            image: Some(red_png(10, 10)),
        };
        let temp_dir = std::env::temp_dir();

        let event = classify(&fake, &temp_dir);
        let path = match event {
            ClipboardEvent::Image(path) => path,
            other => panic!("expected image event, got {:?}", other),
        };

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(path.parent(), Some(temp_dir.as_path()));

        let written = fs::read(&path).unwrap();
        assert!(!written.is_empty());
        let decoded = image::load_from_memory(&written).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
    }

    #[test]
    fn undecodable_image_degrades_to_unknown() {
        let fake = FakeContents {
            text: None,
            image: Some(vec![0xde, 0xad, 0xbe, 0xef]),
        };
        let event = classify(&fake, &std::env::temp_dir());
        assert_eq!(event, ClipboardEvent::Unknown);
    }

    #[test]
    fn unwritable_temp_dir_degrades_to_unknown() {
        let fake = FakeContents {
            text: None,
            image: Some(red_png(2, 2)),
        };
        let event = classify(&fake, Path::new("/nonexistent/clipwatch-test"));
        assert_eq!(event, ClipboardEvent::Unknown);
    }

    #[test]
    fn empty_clipboard_is_unknown() {
        let fake = FakeContents {
            text: None,
            image: None,
        };
        let event = classify(&fake, &std::env::temp_dir());
        assert_eq!(event, ClipboardEvent::Unknown);
    }
}
