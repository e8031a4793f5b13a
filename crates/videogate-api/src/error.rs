//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Domain errors convert into `AppError`
//! first so every failure renders the same way (status, body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use videogate_core::{
    environment_from, is_production_environment, AppError, ErrorMetadata, LogLevel,
    ResolutionError,
};

use crate::proxy::ProxyError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper so `IntoResponse` can be implemented for the core `AppError`.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ResolutionError> for HttpAppError {
    fn from(err: ResolutionError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<ProxyError> for HttpAppError {
    fn from(err: ProxyError) -> Self {
        let app = match err {
            ProxyError::Unreachable(e) => AppError::UpstreamUnavailable(e.to_string()),
            ProxyError::Timeout(limit) => {
                AppError::UpstreamUnavailable(format!("no response within {:?}", limit))
            }
            ProxyError::InvalidTarget(msg) => AppError::Internal(msg),
            ProxyError::Client(e) => AppError::Internal(e.to_string()),
            ProxyError::Response(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    is_production_environment(&environment_from(|key| std::env::var(key).ok()))
}

fn error_body(app_error: &AppError, is_production: bool) -> ErrorResponse {
    // Details are never exposed in production, and never for sensitive errors
    let show_details = !is_production && !app_error.is_sensitive();

    ErrorResponse {
        error: app_error.client_message(),
        details: show_details.then(|| app_error.detailed_message()),
        error_type: show_details.then(|| app_error.error_type().to_string()),
        code: app_error.error_code().to_string(),
        recoverable: app_error.is_recoverable(),
        suggested_action: app_error.suggested_action().map(String::from),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(error_body(app_error, is_production_env()))).into_response()
    }
}
