//! Error types module
//!
//! `AppError` is the unified error surfaced to HTTP callers. `ResolutionError` is the
//! contract of the record store adapter and converts into `AppError`, so every
//! resolution outcome maps onto exactly one response status.

use crate::models::{InvalidVideoId, VideoId};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like unknown ids
    Debug,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORE_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Outcome of a failed identifier resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// Rejected before the store was consulted.
    #[error("Invalid video id: {0}")]
    InvalidIdentifier(#[from] InvalidVideoId),

    #[error("No video record for id {0}")]
    NotFound(VideoId),

    /// Transport failure or timeout talking to the lookup store.
    #[error("Lookup store unavailable: {0}")]
    StoreUnavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Lookup store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Storage service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ResolutionError> for AppError {
    fn from(err: ResolutionError) -> Self {
        match err {
            // A malformed id cannot name a stored video, so it is reported the same
            // way as an unknown one.
            ResolutionError::InvalidIdentifier(_) | ResolutionError::NotFound(_) => {
                AppError::NotFound("Video not found".to_string())
            }
            ResolutionError::StoreUnavailable(msg) => AppError::StoreUnavailable(msg),
        }
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the video ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::StoreUnavailable(_) => (
            500,
            "STORE_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::UpstreamUnavailable(_) => (
            502,
            "UPSTREAM_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::NotFound(_) => "NotFound",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::UpstreamUnavailable(_) => "UpstreamUnavailable",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Internal message, including the dependency's own error text
    pub fn detailed_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::StoreUnavailable(_) => "Error retrieving video".to_string(),
            AppError::UpstreamUnavailable(_) => "Failed to reach video storage".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}
