//! Hypermedia front end for the QMS.
//!
//! Exposes an axum [`Router`] that answers every request with an HTML
//! fragment for htmx to swap into the page, backed by any [`RecordStore`].

pub mod error;
pub mod extract;
pub mod fragment;
pub mod handlers;
pub mod markup;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{delete, get, post},
};
use qms_core::store::RecordStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use handlers::{entity, nav, work_order};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `QMS_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Directory holding the page shell and its assets. Served for any path
  /// the router does not claim.
  #[serde(default)]
  pub static_dir: Option<PathBuf>,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: RecordStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

impl<S: RecordStore> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the QMS.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + 'static,
{
  let static_dir = state.config.static_dir.clone();

  let app = Router::new()
    .route("/home",                 get(nav::home))
    .route("/general-info",         get(nav::general_info))
    .route("/entity/{key}",         get(entity::page::<S>))
    .route("/entity/{key}/create",  post(entity::create::<S>))
    .route("/dmt/list",             get(work_order::list::<S>))
    .route("/dmt/create",           get(work_order::form::<S>).post(work_order::create::<S>))
    .route("/dmt/delete/{id}",      delete(work_order::delete::<S>))
    .with_state(state);

  let app = match static_dir {
    Some(dir) => app.fallback_service(ServeDir::new(dir)),
    None => app,
  };

  app.layer(TraceLayer::new_for_http())
}
