//! Forwarding to the storage service
//!
//! [`rewrite`] builds the outbound request; [`forward`] sends it and streams the
//! storage response back unchanged.

pub mod forward;
pub mod rewrite;

pub use forward::{ForwardingProxy, ForwardingProxyConfig};
pub use rewrite::{build_outbound_request, strip_hop_by_hop, OutboundRequest, StorageTarget};

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid storage target: {0}")]
    InvalidTarget(String),

    #[error("Failed to build storage HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Storage service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("Storage service did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Failed to build relayed response: {0}")]
    Response(String),
}
