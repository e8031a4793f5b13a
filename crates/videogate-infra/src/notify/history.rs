use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use videogate_core::ViewedEvent;

use super::ViewNotifier;

/// Configuration for the history notifier
#[derive(Clone, Debug)]
pub struct HistoryNotifierConfig {
    /// Base URL of the history service, e.g. `http://history`.
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for HistoryNotifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://history".to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to send viewed message: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("History service rejected viewed message with status {0}")]
    Rejected(StatusCode),
}

/// Posts `{"videoPath": ...}` to `<base_url>/viewed`.
#[derive(Clone)]
pub struct HistoryNotifier {
    http_client: Client,
    viewed_url: String,
}

impl HistoryNotifier {
    pub fn new(config: HistoryNotifierConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for history notifications")?;

        Ok(Self {
            http_client,
            viewed_url: format!("{}/viewed", config.base_url.trim_end_matches('/')),
        })
    }

    pub fn viewed_url(&self) -> &str {
        &self.viewed_url
    }

    /// Send one viewed message and wait for the acknowledgement. No retries.
    #[tracing::instrument(skip(self), fields(url = %self.viewed_url))]
    pub async fn send_viewed(&self, video_path: &str) -> Result<(), NotifyError> {
        let response = self
            .http_client
            .post(&self.viewed_url)
            .json(&ViewedEvent::new(video_path))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status));
        }

        Ok(())
    }
}

impl ViewNotifier for HistoryNotifier {
    fn notify(&self, video_path: &str) {
        let notifier = self.clone();
        let video_path = video_path.to_string();

        // Detached: the response to the client never waits on this task.
        tokio::spawn(async move {
            match notifier.send_viewed(&video_path).await {
                Ok(()) => {
                    tracing::info!(video_path = %video_path, "Sent 'viewed' message to history service");
                }
                Err(e) => {
                    tracing::warn!(error = %e, video_path = %video_path, "Failed to send 'viewed' message");
                }
            }
        });
    }
}
