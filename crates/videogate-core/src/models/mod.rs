//! Data models for the gateway
//!
//! The gateway owns no persistent entities: records belong to the lookup store and
//! viewed events are handed to the history service.

mod video;

pub use video::{InvalidVideoId, VideoId, VideoRecord, ViewedEvent, VIDEO_ID_HEX_LEN};
