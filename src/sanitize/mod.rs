//! Pre-store sanitizer
//!
//! Runs once over a finished review batch, immediately before the records
//! are handed to the store: the transient rendering placeholder is dropped
//! (by conversion to [`StoredTask`], which has no such field) and the
//! transcription is rewritten to canonical uncertainty-marker form.

use thiserror::Error;

use crate::markup::{fix_long_s, fix_umlauts, normalize_for_storage};
use crate::task::{StoredTask, TaskView};

/// Sanitizer contract violations
///
/// These indicate a bug in the upstream pipeline, not bad reviewer input,
/// and are surfaced as hard errors rather than tolerated.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// The rendering placeholder was missing from a reviewed task
    #[error("Task {line_hash} reached the sanitizer without its rendering field")]
    MissingRenderField { line_hash: String },
}

/// Whole-text corrections applied to transcriptions before storage
///
/// These are the batch counterparts of the review surface's correction
/// buttons (s → ſ, ä → aͤ); off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corrections {
    /// Replace round 's' with the long s
    pub long_s: bool,
    /// Replace modern umlauts with superscript-e forms
    pub umlauts: bool,
}

/// Sanitize one reviewed task for storage.
pub fn sanitize(task: TaskView) -> Result<StoredTask, SanitizeError> {
    sanitize_with(task, Corrections::default())
}

/// Sanitize one reviewed task, applying `corrections` first.
pub fn sanitize_with(task: TaskView, corrections: Corrections) -> Result<StoredTask, SanitizeError> {
    if task.html.is_none() {
        return Err(SanitizeError::MissingRenderField { line_hash: task.line_hash });
    }
    let mut transcription = task.transcription;
    if corrections.long_s {
        transcription = fix_long_s(&transcription);
    }
    if corrections.umlauts {
        transcription = fix_umlauts(&transcription);
    }
    Ok(StoredTask {
        volume_id: task.volume_id,
        page_num: task.page_num,
        context_area: task.context_area,
        line_area: task.line_area,
        line_hash: task.line_hash,
        transcription: normalize_for_storage(&transcription),
        extra: task.extra,
    })
}

/// Sanitize a finished batch, preserving order.
///
/// No task is dropped or reordered; the first contract violation aborts
/// the batch.
pub fn sanitize_batch(tasks: Vec<TaskView>) -> Result<Vec<StoredTask>, SanitizeError> {
    sanitize_batch_with(tasks, Corrections::default())
}

/// Sanitize a finished batch with whole-text corrections.
pub fn sanitize_batch_with(
    tasks: Vec<TaskView>,
    corrections: Corrections,
) -> Result<Vec<StoredTask>, SanitizeError> {
    tasks
        .into_iter()
        .map(|task| sanitize_with(task, corrections))
        .collect()
}
