//! Task identity derivation
//!
//! Every incoming raw task is assigned a `line_hash` derived from the
//! line's absolute position and size on the page. Two records describing
//! the same physical line always yield the same hash, even when their
//! context framing differs, so the external queue can use the hash as its
//! sole deduplication key.

use crate::ingest::IngestError;

use super::types::{Area, RawTask, TaskView};

/// Placeholder value for the surface's HTML block; any non-null value
/// satisfies the rendering contract.
pub const HTML_PLACEHOLDER: &str = " ";

/// Derive the deduplication key for a line.
///
/// The hash is a pure function of `(volume_id, page_num, abs_x, abs_y,
/// line width, line height)` where the absolute coordinates are the line
/// offset translated into page coordinates. Page numbers are zero-padded
/// to five digits.
pub fn line_hash(volume_id: &str, page_num: i64, context_area: &Area, line_area: &Area) -> String {
    let abs_x = context_area.x + line_area.x;
    let abs_y = context_area.y + line_area.y;
    format!(
        "{}-{:05}-{}-{}-{}-{}",
        volume_id, page_num, abs_x, abs_y, line_area.width, line_area.height
    )
}

/// Decorate one raw task for the review surface.
pub fn decorate(raw: RawTask) -> TaskView {
    let hash = line_hash(&raw.volume_id, raw.page_num, &raw.context_area, &raw.line_area);
    let mut extra = raw.extra;
    // Reserved keys belong to the pipeline, not to upstream metadata
    extra.remove("line_hash");
    extra.remove("html");
    extra.remove("transcription");
    TaskView {
        volume_id: raw.volume_id,
        page_num: raw.page_num,
        context_area: raw.context_area,
        line_area: raw.line_area,
        line_hash: hash,
        html: Some(HTML_PLACEHOLDER.to_string()),
        transcription: String::new(),
        extra,
    }
}

/// Lazily decorate a raw-task stream, preserving order.
///
/// Single pass over a single-pass input; malformed records pass through
/// untouched for the driver's policy to handle.
pub fn decorate_stream<I>(raw: I) -> impl Iterator<Item = Result<TaskView, IngestError>>
where
    I: Iterator<Item = Result<RawTask, IngestError>>,
{
    raw.map(|record| record.map(decorate))
}
