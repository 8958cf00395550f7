//! Store boundary
//!
//! Persistence proper lives outside this crate; what the pipeline needs is
//! upsert-by-key semantics on `line_hash`. [`ReviewStore`] is that
//! contract, [`MemoryStore`] the in-memory implementation backing tests
//! and the CLI's JSONL sink.

use std::collections::HashMap;
use std::io::Write;

use thiserror::Error;

use crate::task::StoredTask;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Upsert-by-key store contract for finished review records
pub trait ReviewStore {
    /// Insert or replace the record stored under `key`.
    fn upsert(&mut self, key: &str, record: StoredTask) -> Result<(), StoreError>;
}

/// In-memory store preserving first-insertion order
#[derive(Debug, Default)]
pub struct MemoryStore {
    index: HashMap<String, usize>,
    records: Vec<StoredTask>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&StoredTask> {
        self.index.get(key).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[StoredTask] {
        &self.records
    }

    /// Write all records as newline-delimited JSON, one per key.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> Result<(), StoreError> {
        for record in &self.records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl ReviewStore for MemoryStore {
    fn upsert(&mut self, key: &str, record: StoredTask) -> Result<(), StoreError> {
        match self.index.get(key) {
            Some(&i) => {
                tracing::debug!(line_hash = %key, "Replacing stored record");
                self.records[i] = record;
            }
            None => {
                self.index.insert(key.to_string(), self.records.len());
                self.records.push(record);
            }
        }
        Ok(())
    }
}

/// Sanitize a finished review batch and upsert every record into `store`.
///
/// Returns the number of records committed. The batch is processed in
/// order; re-reviews of the same line replace the earlier record under its
/// `line_hash`.
pub fn commit_batch<S: ReviewStore>(
    batch: Vec<crate::task::TaskView>,
    store: &mut S,
) -> crate::error::Result<usize> {
    commit_batch_with(batch, crate::sanitize::Corrections::default(), store)
}

/// [`commit_batch`] with whole-text corrections applied during sanitizing.
pub fn commit_batch_with<S: ReviewStore>(
    batch: Vec<crate::task::TaskView>,
    corrections: crate::sanitize::Corrections,
    store: &mut S,
) -> crate::error::Result<usize> {
    let records = crate::sanitize::sanitize_batch_with(batch, corrections)?;
    let count = records.len();
    for record in records {
        let key = record.line_hash.clone();
        store.upsert(&key, record)?;
    }
    Ok(count)
}
