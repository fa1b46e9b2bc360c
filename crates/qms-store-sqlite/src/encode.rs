//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings so that text
//! ordering matches time ordering. Dates are `YYYY-MM-DD`. UUIDs are stored
//! as hyphenated lowercase strings.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use qms_core::{
  record::{Record, RecordState},
  registry::EntityDefinition,
  work_order::{Reference, WORK_ORDER_JOINS, WorkOrder},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read from a registry collection row.
pub struct RawRecord {
  pub id:         String,
  pub created_at: String,
  pub is_active:  bool,
  /// One entry per declared field, in declaration order.
  pub values:     Vec<Option<String>>,
}

impl RawRecord {
  pub fn into_record(self, definition: &EntityDefinition) -> Result<Record> {
    let values: BTreeMap<String, String> = definition
      .fields
      .iter()
      .zip(self.values)
      .filter_map(|(f, v)| v.map(|v| (f.name.to_owned(), v)))
      .collect();

    Ok(Record {
      id: decode_uuid(&self.id)?,
      entity: definition.key,
      values,
      state: RecordState::from_flag(self.is_active),
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read from a work-order row joined with its references.
pub struct RawWorkOrder {
  pub id:         String,
  pub date:       Option<String>,
  pub closed:     bool,
  pub is_active:  bool,
  pub created_at: String,
  /// `(foreign key, projected label)` per entry of [`WORK_ORDER_JOINS`].
  pub references: Vec<(Option<String>, Option<String>)>,
}

impl RawWorkOrder {
  pub fn into_work_order(self) -> Result<WorkOrder> {
    let mut order = WorkOrder::new(decode_uuid(&self.id)?, decode_dt(&self.created_at)?);
    order.date = self.date.as_deref().map(decode_date).transpose()?;
    order.closed = self.closed;
    order.state = RecordState::from_flag(self.is_active);

    for (join, (fk, label)) in WORK_ORDER_JOINS.iter().zip(self.references) {
      // A dangling key has no label; treat it like a missing reference.
      let reference = match (fk, label) {
        (Some(fk), Some(label)) => Some(Reference { id: decode_uuid(&fk)?, label }),
        _ => None,
      };
      order.set_reference(join.role, reference);
    }

    Ok(order)
  }
}
