//! Videogate API
//!
//! HTTP surface of the video gateway: `GET /video?id=` resolves the id, proxies the
//! request to the storage service and reports the view to the history service.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod proxy;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use setup::routes::build_router;
pub use state::AppState;
