//! SQLite backend for the QMS record service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Query text is composed from the entity
//! registry in [`query`]; the active-record filter lives there too.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod query;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
