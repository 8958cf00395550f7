//! Review task model and identity derivation

pub mod identity;
pub mod types;

pub use identity::{decorate, decorate_stream, line_hash, HTML_PLACEHOLDER};
pub use types::{Area, RawTask, StoredTask, TaskView};
