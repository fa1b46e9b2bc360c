//! Error types for `qms-core`.

use thiserror::Error;

use crate::registry::EntityKey;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown entity: {0:?}")]
  UnknownEntity(String),

  #[error("{entity}: field {field:?} is required")]
  MissingField {
    entity: EntityKey,
    field:  &'static str,
  },

  #[error("field {field:?} is not a valid record reference: {value:?}")]
  InvalidReference { field: &'static str, value: String },

  #[error("invalid date {0:?}, expected YYYY-MM-DD")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
