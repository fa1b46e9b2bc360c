//! Core types and trait definitions for the QMS record service.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! holds the entity registry, the record and work-order models, and the
//! [`store::RecordStore`] abstraction every backend implements.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod record;
pub mod registry;
pub mod store;
pub mod work_order;

pub use error::{Error, Result};
