//! Generic entity records and their soft-delete state.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::EntityKey;

/// Raw, untrusted field values as submitted by a client.
pub type FieldMap = HashMap<String, String>;

// ─── State ───────────────────────────────────────────────────────────────────

/// Visibility state of a stored row.
///
/// Only two states are reachable and the only transition is
/// `Active → Inactive`. Reads never surface an inactive row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
  #[default]
  Active,
  Inactive,
}

impl RecordState {
  pub fn is_active(self) -> bool { matches!(self, Self::Active) }

  pub fn from_flag(active: bool) -> Self {
    if active { Self::Active } else { Self::Inactive }
  }

  /// The soft-delete transition. Idempotent.
  #[must_use]
  pub fn deactivate(self) -> Self { Self::Inactive }
}

/// Outcome of a soft-delete request against one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDelete {
  /// The row was active and is now hidden.
  Deactivated,
  /// The row was already inactive; nothing changed.
  AlreadyInactive,
  /// No row has this identifier; nothing changed.
  Missing,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A stored row of one of the registry collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub id:         Uuid,
  pub entity:     EntityKey,
  /// Declared fields that hold a value. Absent optional fields are omitted.
  pub values:     BTreeMap<String, String>,
  pub state:      RecordState,
  pub created_at: DateTime<Utc>,
}

impl Record {
  pub fn value(&self, field: &str) -> Option<&str> {
    self.values.get(field).map(String::as_str)
  }

  /// The leading eight characters of the identifier, used as a badge.
  pub fn short_id(&self) -> String {
    let mut id = self.id.simple().to_string();
    id.truncate(8);
    id
  }
}

/// Whitelisted input for a create; built by
/// [`EntityDefinition::build_insert`](crate::registry::EntityDefinition::build_insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
  pub entity: EntityKey,
  /// `(field, value)` pairs in declaration order.
  pub values: Vec<(&'static str, String)>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deactivate_is_one_way_and_idempotent() {
    let state = RecordState::default();
    assert!(state.is_active());
    let state = state.deactivate();
    assert_eq!(state, RecordState::Inactive);
    assert_eq!(state.deactivate(), RecordState::Inactive);
  }

  #[test]
  fn short_id_is_eight_hex_chars() {
    let record = Record {
      id:         Uuid::parse_str("0f3e9b2c-1111-4222-8333-444455556666")
        .unwrap(),
      entity:     EntityKey::Customers,
      values:     BTreeMap::new(),
      state:      RecordState::Active,
      created_at: Utc::now(),
    };
    assert_eq!(record.short_id(), "0f3e9b2c");
  }
}
