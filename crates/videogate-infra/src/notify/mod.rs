//! View notification delivery
//!
//! After a video starts streaming, the history service is told the path was viewed.
//! Delivery is best-effort: a single attempt in a detached task, with failures only
//! visible in the logs.

mod history;

pub use history::{HistoryNotifier, HistoryNotifierConfig, NotifyError};

/// Side channel told about every successfully proxied video.
pub trait ViewNotifier: Send + Sync + 'static {
    /// Record that `video_path` was viewed. Returns immediately; delivery happens in
    /// the background and its outcome never reaches the caller.
    fn notify(&self, video_path: &str);
}
