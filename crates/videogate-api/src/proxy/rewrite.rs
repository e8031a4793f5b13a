//! Outbound request construction
//!
//! Everything here is pure: the same inbound method, headers and resolved path
//! always produce the same outbound request.

use axum::http::{header, HeaderMap, HeaderName, Method};
use reqwest::Url;

use super::ProxyError;

/// Headers that describe a single connection and are never forwarded.
pub const HOP_BY_HOP_HEADERS: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Location of the storage service's video endpoint.
#[derive(Debug, Clone)]
pub struct StorageTarget {
    base: Url,
}

impl StorageTarget {
    /// `authority` is `host:port` of the storage service.
    pub fn new(authority: &str) -> Result<Self, ProxyError> {
        let base = Url::parse(&format!("http://{}/video", authority))
            .map_err(|e| ProxyError::InvalidTarget(format!("{}: {}", authority, e)))?;
        Ok(Self { base })
    }

    /// `http://<authority>/video?path=<video_path>`, with the path query-encoded.
    pub fn video_url(&self, video_path: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("path", video_path);
        url
    }

    pub fn authority(&self) -> &str {
        self.base.authority()
    }
}

/// The request sent to the storage service, minus the body.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Rewrites an inbound gateway request into the storage request for `video_path`.
///
/// The method and end-to-end headers are kept. The target is replaced and the
/// original query (including `id`) is dropped.
pub fn build_outbound_request(
    method: &Method,
    headers: &HeaderMap,
    target: &StorageTarget,
    video_path: &str,
) -> OutboundRequest {
    let mut headers = headers.clone();
    strip_hop_by_hop(&mut headers);
    // The client derives Host from the outbound URL
    headers.remove(header::HOST);

    OutboundRequest {
        method: method.clone(),
        url: target.video_url(video_path),
        headers,
    }
}

/// Removes hop-by-hop headers, including any named by a `Connection` header.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed.iter().chain(HOP_BY_HOP_HEADERS.iter()) {
        headers.remove(name);
    }
}
