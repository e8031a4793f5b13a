use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Method},
    response::Response,
};
use std::sync::Arc;
use utoipa::IntoParams;
use videogate_core::AppError;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VideoQuery {
    /// 24-character hex identifier of the video record
    pub id: Option<String>,
}

impl VideoQuery {
    /// Picks `id` out of the raw query pairs. A repeated `id` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            id: pairs
                .into_iter()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value),
        }
    }
}

/// Stream a video by id.
///
/// Resolves the id to a storage path, proxies the request to the storage service
/// and relays its response. A view notification is sent to the history service
/// once storage has answered; its outcome never affects this response.
#[utoipa::path(
    get,
    path = "/video",
    tag = "videos",
    params(VideoQuery),
    responses(
        (status = 200, description = "Video stream relayed from storage"),
        (status = 404, description = "Missing, malformed or unknown id", body = ErrorResponse),
        (status = 500, description = "Lookup store unavailable", body = ErrorResponse),
        (status = 502, description = "Storage service unreachable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, pairs, method, headers, body),
    fields(video_id = tracing::field::Empty)
)]
pub async fn stream_video(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, HttpAppError> {
    let query = VideoQuery::from_pairs(pairs);
    let raw_id = query.id.as_deref().unwrap_or_default();
    tracing::Span::current().record("video_id", raw_id);
    if raw_id.is_empty() {
        return Err(AppError::NotFound("Video not found".to_string()).into());
    }

    let record = state.resolver.resolve(raw_id).await?;

    let response = state
        .proxy
        .forward(method, headers, body, &record.video_path)
        .await?;

    state.notifier.notify(&record.video_path);

    Ok(response)
}
