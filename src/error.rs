//! Error types for the Lectura pipeline

use thiserror::Error;

use crate::ingest::IngestError;
use crate::sanitize::SanitizeError;
use crate::store::StoreError;

/// Pipeline-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Pipeline error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Sanitizer error: {0}")]
    Sanitize(#[from] SanitizeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
