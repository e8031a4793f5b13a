//! Videogate Infrastructure Library
//!
//! Shared infrastructure used by the gateway binary:
//! - Middleware (request ID)
//! - View notification delivery to the history service

pub mod middleware;
pub mod notify;

// Re-export commonly used types
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use notify::{HistoryNotifier, HistoryNotifierConfig, NotifyError, ViewNotifier};
