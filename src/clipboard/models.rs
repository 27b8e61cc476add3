//! clipwatch - Clipboard event model
//!
//! Defines the event delivered to the sink for each detected clipboard change

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One detected clipboard change.
///
/// Exactly one variant is produced per change. Serializes with a `type`
/// discriminator and a `data` payload that is present only for `text`
/// (the copied string) and `image` (path to the materialized PNG file):
///
/// ```json
/// {"type": "text", "data": "hello"}
/// {"type": "image", "data": "/tmp/9f4c....png"}
/// {"type": "unknown"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ClipboardEvent {
    /// Plain text content, carried inline
    Text(String),
    /// Image content, materialized as a PNG file in the temp directory
    Image(PathBuf),
    /// The clipboard changed but held no recognizable payload
    Unknown,
}

impl ClipboardEvent {
    /// Discriminator label, matching the serialized `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            ClipboardEvent::Text(_) => "text",
            ClipboardEvent::Image(_) => "image",
            ClipboardEvent::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_event_serializes_with_inline_data() {
        let event = ClipboardEvent::Text("hello world".to_string());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["data"], "hello world");
    }

    #[test]
    fn image_event_serializes_with_path_data() {
        let event = ClipboardEvent::Image(PathBuf::from("/tmp/abc.png"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["data"], "/tmp/abc.png");
    }

    #[test]
    fn unknown_event_carries_no_data_field() {
        let event = ClipboardEvent::Unknown;
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "unknown");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn events_round_trip_through_json() {
        for event in [
            ClipboardEvent::Text(String::new()),
            ClipboardEvent::Image(PathBuf::from("/tmp/x.png")),
            ClipboardEvent::Unknown,
        ] {
            let json = serde_json::to_string(&event).unwrap();
            let back: ClipboardEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }
}
