//! Database repositories for data access layer
//!
//! The gateway only ever reads from the lookup store; records are created and owned
//! by whatever loads the `videos` collection.

pub mod video;
