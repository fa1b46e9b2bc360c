//! Handlers for `/dmt` endpoints (work-order records).
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/dmt/list` | Table of active work orders |
//! | `GET`    | `/dmt/create` | Create form with reference selects |
//! | `POST`   | `/dmt/create` | Insert; returns the refreshed table |
//! | `DELETE` | `/dmt/delete/{id}` | Soft delete; empty body on success |

use std::collections::BTreeMap;

use axum::{
  extract::{Path, State},
  response::Html,
};
use qms_core::{
  record::SoftDelete,
  store::RecordStore,
  work_order::{NewWorkOrder, WORK_ORDER_JOINS, WorkOrderInsert},
};
use uuid::Uuid;

use crate::{AppState, error::Error, extract::Fields, fragment};

/// `GET /dmt/list`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: RecordStore,
{
  let orders = state
    .store
    .list_active_work_orders()
    .await
    .map_err(Error::store("Error loading DMT records"))?;

  Ok(Html(fragment::render_work_orders(&orders)))
}

/// `GET /dmt/create`
pub async fn form<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: RecordStore,
{
  let mut options = BTreeMap::new();
  for join in &WORK_ORDER_JOINS {
    if options.contains_key(&join.target) {
      continue;
    }
    let definition = join.target.definition();
    let records = state
      .store
      .list_active(definition)
      .await
      .map_err(Error::store(format!("Error loading {}", definition.meta.plural)))?;
    options.insert(join.target, records);
  }

  Ok(Html(fragment::render_work_order_form(&options)))
}

/// `POST /dmt/create`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Fields(raw): Fields,
) -> Result<Html<String>, Error>
where
  S: RecordStore,
{
  let input = NewWorkOrder::from_fields(&raw)
    .map_err(|e| Error::core("Error creating DMT record", e))?;

  let outcome = state
    .store
    .insert_work_order(input)
    .await
    .map_err(Error::store("Error creating DMT record"))?;

  let id = match outcome {
    WorkOrderInsert::Created(id) => id,
    WorkOrderInsert::UnknownReference { join, id } => {
      return Err(Error::core(
        "Error creating DMT record",
        qms_core::Error::InvalidReference {
          field: join.column,
          value: id.to_string(),
        },
      ));
    }
  };
  tracing::info!(%id, "created work order");

  let orders = state
    .store
    .list_active_work_orders()
    .await
    .map_err(Error::store("Error creating DMT record"))?;

  Ok(Html(fragment::render_work_orders(&orders)))
}

/// `DELETE /dmt/delete/{id}`
///
/// Answers with an empty body so the client drops the row locally. Deleting
/// an already-deleted or unknown id is also a success.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Html<String>, Error>
where
  S: RecordStore,
{
  let id = Uuid::parse_str(&id)
    .map_err(|_| Error::BadRequest(format!("{id:?} is not a record id")))?;

  let outcome = state
    .store
    .soft_delete_work_order(id)
    .await
    .map_err(Error::store("Error deleting DMT record"))?;

  match outcome {
    SoftDelete::Deactivated => tracing::info!(%id, "deleted work order"),
    SoftDelete::AlreadyInactive | SoftDelete::Missing => {
      tracing::debug!(%id, ?outcome, "delete had no visible effect");
    }
  }

  Ok(Html(String::new()))
}
