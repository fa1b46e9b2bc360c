//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use qms_core::{
  record::{NewRecord, Record, RecordState, SoftDelete},
  registry::EntityDefinition,
  store::RecordStore,
  work_order::{
    NewWorkOrder, WORK_ORDER_COLLECTION, WORK_ORDER_JOINS, WorkOrder, WorkOrderInsert,
  },
};

use crate::{
  Result,
  encode::{RawRecord, RawWorkOrder, encode_date, encode_dt, encode_uuid},
  query::{self, RECORD_BASE_COLUMNS, WORK_ORDER_BASE_COLUMNS},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A QMS record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Flip `is_active` off for one row of `collection`, reporting which case
  /// applied.
  pub(crate) async fn soft_delete_in(
    &self,
    collection: &'static str,
    id: Uuid,
  ) -> Result<SoftDelete> {
    let id_str = encode_uuid(id);

    let outcome = self
      .conn
      .call(move |conn| {
        let changed =
          conn.execute(&query::soft_delete(collection), rusqlite::params![id_str])?;
        if changed > 0 {
          return Ok(SoftDelete::Deactivated);
        }

        let exists = conn
          .query_row(&query::exists(collection), rusqlite::params![id_str], |_| {
            Ok(())
          })
          .optional()?
          .is_some();

        Ok(if exists {
          SoftDelete::AlreadyInactive
        } else {
          SoftDelete::Missing
        })
      })
      .await?;

    tracing::debug!(%collection, %id, ?outcome, "soft delete");
    Ok(outcome)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Registry collections ──────────────────────────────────────────────────

  async fn list_active(
    &self,
    definition: &'static EntityDefinition,
  ) -> Result<Vec<Record>> {
    let sql = query::select_active(definition);
    let width = definition.fields.len();

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| {
            let values = (0..width)
              .map(|i| row.get::<_, Option<String>>(RECORD_BASE_COLUMNS + i))
              .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(RawRecord {
              id: row.get(0)?,
              created_at: row.get(1)?,
              is_active: row.get(2)?,
              values,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| raw.into_record(definition))
      .collect()
  }

  async fn insert(&self, mut input: NewRecord) -> Result<Record> {
    let definition = input.entity.definition();
    input.values.retain(|(name, _)| definition.field(name).is_some());

    let record = Record {
      id:         Uuid::new_v4(),
      entity:     input.entity,
      values:     input
        .values
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect(),
      state:      RecordState::Active,
      created_at: Utc::now().trunc_subsecs(6),
    };

    let columns: Vec<&str> = input.values.iter().map(|(name, _)| *name).collect();
    let sql = query::insert(definition, &columns);

    let mut params = vec![encode_uuid(record.id), encode_dt(record.created_at)];
    params.extend(input.values.into_iter().map(|(_, value)| value));

    self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(())
      })
      .await?;

    tracing::debug!(entity = %record.entity, id = %record.id, "inserted record");
    Ok(record)
  }

  // ── Work orders ───────────────────────────────────────────────────────────

  async fn list_active_work_orders(&self) -> Result<Vec<WorkOrder>> {
    let sql = query::select_active_work_orders();

    let raws: Vec<RawWorkOrder> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |row| {
            let references = (0..WORK_ORDER_JOINS.len())
              .map(|i| -> rusqlite::Result<(Option<String>, Option<String>)> {
                let at = WORK_ORDER_BASE_COLUMNS + 2 * i;
                Ok((row.get(at)?, row.get(at + 1)?))
              })
              .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(RawWorkOrder {
              id: row.get(0)?,
              date: row.get(1)?,
              closed: row.get(2)?,
              is_active: row.get(3)?,
              created_at: row.get(4)?,
              references,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWorkOrder::into_work_order).collect()
  }

  async fn insert_work_order(&self, input: NewWorkOrder) -> Result<WorkOrderInsert> {
    let id = Uuid::new_v4();
    let sql = query::insert_work_order();

    let mut params = vec![
      Value::Text(encode_uuid(id)),
      Value::Text(encode_dt(Utc::now().trunc_subsecs(6))),
      input.date.map_or(Value::Null, |d| Value::Text(encode_date(d))),
      Value::Integer(i64::from(input.closed)),
    ];
    params.extend(WORK_ORDER_JOINS.iter().map(|join| {
      input
        .references
        .get(&join.role)
        .map_or(Value::Null, |fk| Value::Text(encode_uuid(*fk)))
    }));
    let references = input.references;

    let outcome = self
      .conn
      .call(move |conn| {
        for join in &WORK_ORDER_JOINS {
          let Some(fk) = references.get(&join.role).copied() else {
            continue;
          };
          let found = conn
            .query_row(
              &query::exists(join.target.definition().collection),
              rusqlite::params![encode_uuid(fk)],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if !found {
            return Ok(WorkOrderInsert::UnknownReference { join, id: fk });
          }
        }

        conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(WorkOrderInsert::Created(id))
      })
      .await?;

    tracing::debug!(?outcome, "insert work order");
    Ok(outcome)
  }

  async fn soft_delete_work_order(&self, id: Uuid) -> Result<SoftDelete> {
    self.soft_delete_in(WORK_ORDER_COLLECTION, id).await
  }
}
