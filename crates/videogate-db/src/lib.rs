//! Videogate DB Library
//!
//! Record store adapter: the lookup store abstraction, its Postgres and in-memory
//! implementations, and the resolver the gateway handler calls.

pub mod db;

pub use db::video::{
    InMemoryVideoRecordStore, PgVideoRecordStore, RecordResolver, StoreError, VideoRecordStore,
};
