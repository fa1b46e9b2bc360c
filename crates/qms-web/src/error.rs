//! Error types and the axum `IntoResponse` implementation.
//!
//! Every error is answered with an error fragment rather than a bare status,
//! so the region the client asked to update always gets renderable markup.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::fragment::render_error;

#[derive(Debug, Error)]
pub enum Error {
  /// The path named an entity the registry does not know.
  #[error("entity not found: {0}")]
  NotFound(String),

  /// The submitted fields are well-formed but unacceptable.
  #[error("{context}: {message}")]
  Invalid { context: String, message: String },

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{context}: {source}")]
  Store {
    context: String,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  /// Map a registry or input error, keeping unknown entities distinct.
  pub fn core(context: impl Into<String>, err: qms_core::Error) -> Self {
    match err {
      qms_core::Error::UnknownEntity(key) => Error::NotFound(key),
      other => Error::Invalid {
        context: context.into(),
        message: other.to_string(),
      },
    }
  }

  /// Wrap a storage failure with what the request was doing.
  pub fn store<E>(context: impl Into<String>) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    let context = context.into();
    move |e| Error::Store { context, source: Box::new(e) }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      Error::NotFound(key) => {
        tracing::debug!(%key, "unknown entity");
        (
          StatusCode::NOT_FOUND,
          render_error("Entity not found", &format!("No entity is registered as {key:?}")),
        )
      }
      Error::Invalid { context, message } => {
        (StatusCode::UNPROCESSABLE_ENTITY, render_error(context, message))
      }
      Error::BadRequest(message) => {
        (StatusCode::BAD_REQUEST, render_error("Bad request", message))
      }
      Error::Store { context, source } => {
        tracing::error!(%context, error = %source, "storage failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          render_error(context, &source.to_string()),
        )
      }
    };
    (status, Html(body)).into_response()
  }
}
