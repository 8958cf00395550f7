//! Review-surface configuration payload
//!
//! The review surface itself (highlight overlay, character picker, input
//! styling) is an external collaborator; this module only assembles the
//! configuration data it consumes: the historical-character keyboard and
//! the reviewer session allow-list. The allow-list is embedded here and
//! interpreted nowhere else in the pipeline.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Configuration handed to the external review surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Characters offered by the picker, in display order
    pub keyboard: Vec<String>,
    /// Session identifiers permitted to review
    pub allowed_sessions: Vec<String>,
    /// Label shown above the transcription input
    pub field_label: String,
}

impl SurfaceConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            keyboard: config.review.keyboard.clone(),
            allowed_sessions: config.review.allowed_sessions.clone(),
            field_label: "Transkription".to_string(),
        }
    }
}
