//! Videogate Core Library
//!
//! Domain models, error types and configuration shared by the gateway crates.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{environment_from, is_production_environment, Config};
pub use error::{AppError, ErrorMetadata, LogLevel, ResolutionError};
pub use models::{VideoId, VideoRecord, ViewedEvent};
