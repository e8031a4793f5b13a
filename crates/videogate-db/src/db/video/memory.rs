use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use videogate_core::{VideoId, VideoRecord};

use super::store::{StoreError, VideoRecordStore};

/// Lookup store held in process memory.
///
/// Backs the gateway's tests. Fixtures use the same JSON shape as the `videos`
/// collection dump:
/// `[{"id": "<24 hex chars>", "videoPath": "<path>"}]`.
#[derive(Clone, Default)]
pub struct InMemoryVideoRecordStore {
    records: Arc<RwLock<HashMap<VideoId, VideoRecord>>>,
}

impl InMemoryVideoRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = VideoRecord>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    /// Parse a fixture document. Duplicate ids are rejected since ids are unique in the store.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<VideoRecord> = serde_json::from_str(json)
            .map_err(|e| StoreError::Backend(format!("Invalid video fixture: {}", e)))?;

        let mut map = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            if map.insert(id.clone(), record).is_some() {
                return Err(StoreError::Backend(format!(
                    "Duplicate video id in fixture: {}",
                    id
                )));
            }
        }

        Ok(Self {
            records: Arc::new(RwLock::new(map)),
        })
    }

    pub fn insert(&self, record: VideoRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Backend("record map lock poisoned".to_string()))?;
        records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VideoRecordStore for InMemoryVideoRecordStore {
    async fn find_by_id(&self, id: &VideoId) -> Result<Option<VideoRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Backend("record map lock poisoned".to_string()))?;
        Ok(records.get(id).cloned())
    }
}
