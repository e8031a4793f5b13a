//! Lookup store abstraction
//!
//! Any key-value or document store that can answer "find record by id" can back the
//! gateway; the resolver never sees which one it is talking to.

use async_trait::async_trait;
use thiserror::Error;
use videogate_core::{VideoId, VideoRecord};

/// Lookup store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store backend error: {0}")]
    Backend(String),

    /// A stored row could not be turned into a record.
    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

#[async_trait]
pub trait VideoRecordStore: Send + Sync + 'static {
    /// Retrieves the record for a given id.
    /// Returns `None` if the id does not exist.
    async fn find_by_id(&self, id: &VideoId) -> Result<Option<VideoRecord>, StoreError>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
