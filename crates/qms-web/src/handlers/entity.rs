//! Handlers for `/entity/{key}` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/entity/{key}` | Management card: form + list region |
//! | `POST` | `/entity/{key}/create` | Form or JSON body; returns the refreshed list region |

use axum::{extract::State, response::Html};
use qms_core::store::RecordStore;

use crate::{
  AppState,
  error::Error,
  extract::{EntityPath, Fields},
  fragment,
};

/// `GET /entity/{key}`
pub async fn page<S>(
  State(state): State<AppState<S>>,
  EntityPath(definition): EntityPath,
) -> Result<Html<String>, Error>
where
  S: RecordStore,
{
  let records = state
    .store
    .list_active(definition)
    .await
    .map_err(Error::store(format!("Error loading {}", definition.meta.plural)))?;

  Ok(Html(fragment::render_entity_page(definition, &records)))
}

/// `POST /entity/{key}/create`
///
/// Inserts the whitelisted subset of the submitted fields, then re-reads the
/// whole collection so the returned list matches storage exactly.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  EntityPath(definition): EntityPath,
  Fields(raw): Fields,
) -> Result<Html<String>, Error>
where
  S: RecordStore,
{
  let input = definition
    .build_insert(&raw)
    .map_err(|e| Error::core("Error creating item", e))?;

  let record = state
    .store
    .insert(input)
    .await
    .map_err(Error::store("Error creating item"))?;
  tracing::info!(entity = %definition.key, id = %record.id, "created record");

  let records = state
    .store
    .list_active(definition)
    .await
    .map_err(Error::store("Error creating item"))?;

  Ok(Html(fragment::render_list(definition, &records)))
}
