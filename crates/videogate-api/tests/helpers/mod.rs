//! Test helpers: build AppState and router for integration tests.
//!
//! The lookup store is in-memory and the storage service is a mockito server, so
//! these tests need neither Postgres nor Docker.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use videogate_api::proxy::{ForwardingProxy, ForwardingProxyConfig};
use videogate_api::{build_router, AppState};
use videogate_core::{VideoId, VideoRecord};
use videogate_db::{InMemoryVideoRecordStore, RecordResolver, StoreError, VideoRecordStore};
use videogate_infra::ViewNotifier;

pub const VIDEO_ID: &str = "64f1a2b3c4d5e6f708192a3b";
pub const VIDEO_PATH: &str = "sample.mp4";

/// Notifier that records every path it is asked to report.
#[derive(Default)]
pub struct RecordingNotifier {
    paths: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl ViewNotifier for RecordingNotifier {
    fn notify(&self, video_path: &str) {
        self.paths.lock().unwrap().push(video_path.to_string());
    }
}

/// Store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl VideoRecordStore for FailingStore {
    async fn find_by_id(&self, _id: &VideoId) -> Result<Option<VideoRecord>, StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

/// Store holding the single record `VIDEO_ID -> VIDEO_PATH`.
pub fn sample_store() -> Arc<dyn VideoRecordStore> {
    let record = VideoRecord::new(VideoId::parse(VIDEO_ID).unwrap(), VIDEO_PATH);
    Arc::new(InMemoryVideoRecordStore::with_records([record]))
}

/// `host:port` on which nothing is listening.
pub async fn closed_authority() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr.to_string()
}

/// State wired to the given store, storage address and notifier.
pub fn test_state(
    store: Arc<dyn VideoRecordStore>,
    storage_authority: &str,
    notifier: Arc<dyn ViewNotifier>,
) -> Arc<AppState> {
    let proxy = ForwardingProxy::new(ForwardingProxyConfig {
        storage_authority: storage_authority.to_string(),
        connect_timeout: Duration::from_secs(2),
        response_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_secs(2),
    })
    .expect("Failed to create storage proxy");

    Arc::new(AppState {
        resolver: RecordResolver::new(store, Duration::from_secs(2)),
        proxy,
        notifier,
    })
}

pub fn test_server(
    store: Arc<dyn VideoRecordStore>,
    storage_authority: &str,
    notifier: Arc<dyn ViewNotifier>,
) -> TestServer {
    let state = test_state(store, storage_authority, notifier);
    TestServer::new(build_router(state, 100)).expect("Failed to create test server")
}
