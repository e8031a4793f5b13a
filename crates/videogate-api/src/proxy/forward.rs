use axum::{
    body::{Body, HttpBody},
    http::{HeaderMap, Method},
    response::Response,
};
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;

use super::rewrite::{build_outbound_request, strip_hop_by_hop, StorageTarget};
use super::ProxyError;

#[derive(Debug, Clone)]
pub struct ForwardingProxyConfig {
    /// `host:port` of the storage service.
    pub storage_authority: String,
    pub connect_timeout: Duration,
    /// Upper bound on waiting for the response head.
    pub response_timeout: Duration,
    /// Upper bound on a stall between body chunks.
    pub read_timeout: Duration,
}

/// Single-hop reverse proxy to the storage service's `/video` endpoint.
#[derive(Clone)]
pub struct ForwardingProxy {
    client: Client,
    target: StorageTarget,
    response_timeout: Duration,
}

impl ForwardingProxy {
    pub fn new(config: ForwardingProxyConfig) -> Result<Self, ProxyError> {
        let target = StorageTarget::new(&config.storage_authority)?;

        // Redirects from storage are relayed to the caller, not followed
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(ProxyError::Client)?;

        Ok(Self {
            client,
            target,
            response_timeout: config.response_timeout,
        })
    }

    pub fn target(&self) -> &StorageTarget {
        &self.target
    }

    /// Sends the rewritten request and relays the storage response.
    ///
    /// Returns once the response head has arrived; the body is streamed to the
    /// caller as storage produces it. Any status storage answers with, including
    /// 4xx and 5xx, is relayed as-is. Only a failure to get a response head at all
    /// is an error.
    #[tracing::instrument(skip(self, headers, body), fields(storage = %self.target.authority()))]
    pub async fn forward(
        &self,
        method: Method,
        headers: HeaderMap,
        body: Body,
        video_path: &str,
    ) -> Result<Response, ProxyError> {
        let outbound = build_outbound_request(&method, &headers, &self.target, video_path);

        let mut request = self
            .client
            .request(outbound.method, outbound.url)
            .headers(outbound.headers);
        if body.size_hint().exact() != Some(0) {
            request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = tokio::time::timeout(self.response_timeout, request.send())
            .await
            .map_err(|_| ProxyError::Timeout(self.response_timeout))?
            .map_err(ProxyError::Unreachable)?;

        tracing::debug!(status = %upstream.status(), "Storage service responded");

        relay_response(upstream)
    }
}

fn relay_response(upstream: reqwest::Response) -> Result<Response, ProxyError> {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);

    let stream = upstream.bytes_stream().map(|chunk| {
        chunk.map_err(|e| {
            // Headers are already on the wire; the client sees a truncated body
            tracing::error!(error = %e, "Video stream from storage interrupted");
            std::io::Error::other(e.to_string())
        })
    });

    let mut response = Response::builder()
        .status(status)
        .body(Body::from_stream(stream))
        .map_err(|e| ProxyError::Response(e.to_string()))?;
    *response.headers_mut() = headers;

    Ok(response)
}
