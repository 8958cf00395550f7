//! Lectura
//!
//! Review pipeline for OCR line transcriptions of scanned documents. A
//! human reviewer is shown a cropped line inside its page context and
//! corrects the machine transcription; this crate owns the task-identity
//! and annotation-normalization core around that workflow:
//!
//! - `task`: the review task model and the deterministic `line_hash`
//!   identity each task is deduplicated and stored under
//! - `ingest`: streaming newline-delimited JSON ingestion with an explicit
//!   malformed-record policy
//! - `markup`: uncertainty-span markup and its canonical storage form
//! - `sanitize`: the pre-store pass that strips the transient rendering
//!   field and canonicalizes transcriptions
//! - `store`: the upsert-by-key boundary to the external store
//! - `render` / `config`: the configuration payload for the external
//!   review surface, including the session allow-list

pub mod config;
pub mod error;
pub mod ingest;
pub mod markup;
pub mod render;
pub mod sanitize;
pub mod store;
pub mod task;

pub use error::{AppError, Result};
