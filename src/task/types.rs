//! Review task types
//!
//! The pipeline distinguishes the decorated view handed to the review
//! surface from the persisted record: the transient rendering field only
//! exists on [`TaskView`], so it cannot leak into storage by construction.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A pixel rectangle in page coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// One raw review record as read from the ingestion stream
///
/// `line_area` is expressed relative to `context_area`'s origin. Fields we
/// do not interpret (image URLs, viewer links, upstream metadata) are kept
/// in `extra` and travel through the whole pipeline unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTask {
    /// Source volume/book identifier
    pub volume_id: String,
    /// Page index within the volume
    pub page_num: i64,
    /// The larger image crop shown for spatial orientation
    pub context_area: Area,
    /// The line to transcribe, relative to the context crop
    pub line_area: Area,
    /// Passthrough metadata for the review surface
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A decorated task as handed to the external review surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    pub volume_id: String,
    pub page_num: i64,
    pub context_area: Area,
    pub line_area: Area,
    /// Deduplication and storage key, derived from line geometry
    pub line_hash: String,
    /// Transient rendering placeholder; required by the surface's HTML
    /// block contract, never persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Reviewer-entered transcription, empty until reviewed
    #[serde(default)]
    pub transcription: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The persisted record shape, keyed by `line_hash`
///
/// Identical to [`TaskView`] minus the rendering placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTask {
    pub volume_id: String,
    pub page_num: i64,
    pub context_area: Area,
    pub line_area: Area,
    pub line_hash: String,
    pub transcription: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_task_keeps_unknown_fields() {
        let json = r#"{
            "volume_id": "vol42",
            "page_num": 7,
            "context_area": {"x": 100, "y": 200, "width": 500, "height": 80},
            "line_area": {"x": 10, "y": 5, "width": 120, "height": 30},
            "context_image_url": "https://img.example/ctx.png"
        }"#;
        let task: RawTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.volume_id, "vol42");
        assert_eq!(
            task.extra.get("context_image_url").and_then(Value::as_str),
            Some("https://img.example/ctx.png")
        );
    }

    #[test]
    fn test_raw_task_missing_geometry_fails() {
        let json = r#"{"volume_id": "vol42", "page_num": 7}"#;
        assert!(serde_json::from_str::<RawTask>(json).is_err());
    }

    #[test]
    fn test_stored_task_has_no_html_field() {
        let stored = StoredTask {
            volume_id: "vol42".into(),
            page_num: 7,
            context_area: Area { x: 0, y: 0, width: 10, height: 10 },
            line_area: Area { x: 0, y: 0, width: 5, height: 5 },
            line_hash: "vol42-00007-0-0-5-5".into(),
            transcription: String::new(),
            extra: BTreeMap::new(),
        };
        let value = serde_json::to_value(&stored).unwrap();
        assert!(value.get("html").is_none());
    }
}
