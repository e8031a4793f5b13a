//! Identifier resolution
//!
//! Turns the raw `id` query value into a record. Every call is a fresh, bounded read:
//! nothing is cached between requests and nothing is retried.

use std::sync::Arc;
use std::time::Duration;
use videogate_core::{ResolutionError, VideoId, VideoRecord};

use super::store::VideoRecordStore;

#[derive(Clone)]
pub struct RecordResolver {
    store: Arc<dyn VideoRecordStore>,
    timeout: Duration,
}

impl RecordResolver {
    pub fn new(store: Arc<dyn VideoRecordStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn store(&self) -> &Arc<dyn VideoRecordStore> {
        &self.store
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, raw_id: &str) -> Result<VideoRecord, ResolutionError> {
        let id = VideoId::parse(raw_id)?;

        let record = match tokio::time::timeout(self.timeout, self.store.find_by_id(&id)).await {
            Ok(Ok(Some(record))) => record,
            Ok(Ok(None)) => return Err(ResolutionError::NotFound(id)),
            Ok(Err(e)) => {
                tracing::error!(error = %e, video_id = %id, "Lookup store query failed");
                return Err(ResolutionError::StoreUnavailable(e.to_string()));
            }
            Err(_) => {
                tracing::error!(
                    video_id = %id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Lookup store query timed out"
                );
                return Err(ResolutionError::StoreUnavailable(format!(
                    "lookup timed out after {}ms",
                    self.timeout.as_millis()
                )));
            }
        };

        if record.video_path.is_empty() {
            tracing::warn!(video_id = %id, "Video record has an empty path");
            return Err(ResolutionError::NotFound(id));
        }

        tracing::info!(video_id = %id, video_path = %record.video_path, "Translated id to path");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::video::{InMemoryVideoRecordStore, StoreError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ID: &str = "64f1a2b3c4d5e6f708192a3b";

    /// Store that counts calls and answers with a fixed outcome.
    struct ScriptedStore {
        calls: AtomicUsize,
        delay: Duration,
        fail: bool,
    }

    impl ScriptedStore {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
                fail: true,
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
                fail: false,
            }
        }
    }

    #[async_trait]
    impl VideoRecordStore for ScriptedStore {
        async fn find_by_id(&self, id: &VideoId) -> Result<Option<VideoRecord>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(StoreError::Backend("connection refused".to_string()));
            }
            Ok(Some(VideoRecord::new(id.clone(), "sample.mp4")))
        }
    }

    fn resolver_with(records: Vec<VideoRecord>) -> RecordResolver {
        RecordResolver::new(
            Arc::new(InMemoryVideoRecordStore::with_records(records)),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_resolve_known_id() {
        let id = VideoId::parse(ID).unwrap();
        let resolver = resolver_with(vec![VideoRecord::new(id.clone(), "sample.mp4")]);

        let record = resolver.resolve(ID).await.unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.video_path, "sample.mp4");
    }

    #[tokio::test]
    async fn test_resolve_unknown_id() {
        let resolver = resolver_with(vec![]);
        match resolver.resolve(ID).await {
            Err(ResolutionError::NotFound(id)) => assert_eq!(id.as_str(), ID),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let store = Arc::new(ScriptedStore::failing());
        let resolver = RecordResolver::new(store.clone(), Duration::from_secs(1));

        for raw in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert!(matches!(
                resolver.resolve(raw).await,
                Err(ResolutionError::InvalidIdentifier(_))
            ));
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_unavailable() {
        let store = Arc::new(ScriptedStore::failing());
        let resolver = RecordResolver::new(store.clone(), Duration::from_secs(1));

        match resolver.resolve(ID).await {
            Err(ResolutionError::StoreUnavailable(msg)) => {
                assert!(msg.contains("connection refused"))
            }
            other => panic!("Expected StoreUnavailable, got {:?}", other),
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let store = Arc::new(ScriptedStore::slow(Duration::from_secs(5)));
        let resolver = RecordResolver::new(store, Duration::from_millis(50));

        match resolver.resolve(ID).await {
            Err(ResolutionError::StoreUnavailable(msg)) => assert!(msg.contains("timed out")),
            other => panic!("Expected StoreUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_path_is_not_found() {
        let id = VideoId::parse(ID).unwrap();
        let resolver = resolver_with(vec![VideoRecord::new(id, "")]);
        assert!(matches!(
            resolver.resolve(ID).await,
            Err(ResolutionError::NotFound(_))
        ));
    }
}
