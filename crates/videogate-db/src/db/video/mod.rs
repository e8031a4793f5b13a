mod memory;
mod postgres;
mod resolver;
mod store;

pub use memory::InMemoryVideoRecordStore;
pub use postgres::PgVideoRecordStore;
pub use resolver::RecordResolver;
pub use store::{StoreError, VideoRecordStore};
