//! Request handlers, one module per page area.
//!
//! Each handler is a fresh, independent transition: resolve, call the store,
//! render one fragment. Nothing is cached between requests.

pub mod entity;
pub mod nav;
pub mod work_order;
