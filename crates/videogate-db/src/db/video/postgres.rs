use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use videogate_core::{VideoId, VideoRecord};

use super::store::{StoreError, VideoRecordStore};

/// Lookup store backed by the `videos` table.
#[derive(Clone)]
pub struct PgVideoRecordStore {
    pool: PgPool,
}

impl PgVideoRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VideoRecordStore for PgVideoRecordStore {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn find_by_id(&self, id: &VideoId) -> Result<Option<VideoRecord>, StoreError> {
        let row = sqlx::query_as::<Postgres, (String, String)>(
            "SELECT id, video_path FROM videos WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(stored_id, video_path)| {
            VideoId::parse(&stored_id)
                .map(|id| VideoRecord::new(id, video_path))
                .map_err(|e| StoreError::Corrupt {
                    id: stored_id.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
