//! Query composition over the entity registry.
//!
//! Table and column names come only from the static registry and the
//! work-order join table, never from request input, so they are safe to
//! splice into SQL text. Values always travel as bound parameters.

use qms_core::{
  registry::EntityDefinition,
  work_order::{WORK_ORDER_COLLECTION, WORK_ORDER_JOINS},
};

// ─── Active-record filter ────────────────────────────────────────────────────

/// The visibility predicate composed into every read.
pub const ACTIVE_FILTER: &str = "is_active = 1";

/// Soft delete: clear the flag of one still-active row.
pub fn soft_delete(collection: &str) -> String {
  format!("UPDATE {collection} SET is_active = 0 WHERE id = ?1 AND {ACTIVE_FILTER}")
}

/// Whether a row with `?1` exists at all, whatever its flag.
pub fn exists(collection: &str) -> String {
  format!("SELECT 1 FROM {collection} WHERE id = ?1")
}

// ─── Registry collections ────────────────────────────────────────────────────

/// Number of leading columns before the declared fields in [`select_active`].
pub const RECORD_BASE_COLUMNS: usize = 3;

/// `id, created_at, is_active`, then every declared field in order.
pub fn select_active(definition: &EntityDefinition) -> String {
  let fields = definition
    .fields
    .iter()
    .map(|f| f.name)
    .collect::<Vec<_>>()
    .join(", ");

  format!(
    "SELECT id, created_at, is_active, {fields}
     FROM {collection}
     WHERE {ACTIVE_FILTER}
     ORDER BY {display} ASC, rowid ASC",
    collection = definition.collection,
    display = definition.display_field,
  )
}

/// Insert of `id`, `created_at` and the given declared columns, bound as
/// `?1..?n` in that order. `is_active` takes its column default.
pub fn insert(definition: &EntityDefinition, columns: &[&str]) -> String {
  insert_into(definition.collection, columns)
}

fn insert_into(collection: &str, columns: &[&str]) -> String {
  let names = ["id", "created_at"]
    .iter()
    .chain(columns)
    .copied()
    .collect::<Vec<_>>()
    .join(", ");
  let placeholders = (1..=columns.len() + 2)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");

  format!("INSERT INTO {collection} ({names}) VALUES ({placeholders})")
}

// ─── Work orders ─────────────────────────────────────────────────────────────

/// Number of leading columns before the join pairs in
/// [`select_active_work_orders`].
pub const WORK_ORDER_BASE_COLUMNS: usize = 5;

/// Active work orders with one `LEFT JOIN` per role.
///
/// Columns: `id, date, dmt_closed, is_active, created_at`, then for every
/// entry of [`WORK_ORDER_JOINS`] the foreign key and the projected label.
/// Joins to the same table are told apart by their role alias.
pub fn select_active_work_orders() -> String {
  let mut columns = vec![
    "d.id".to_owned(),
    "d.date".to_owned(),
    "d.dmt_closed".to_owned(),
    "d.is_active".to_owned(),
    "d.created_at".to_owned(),
  ];
  let mut joins = Vec::with_capacity(WORK_ORDER_JOINS.len());

  for join in &WORK_ORDER_JOINS {
    let alias = join.alias();
    columns.push(format!("d.{}", join.column));
    columns.push(format!("{alias}.{} AS {alias}_label", join.projection()));
    joins.push(format!(
      "LEFT JOIN {target} {alias} ON {alias}.id = d.{column}",
      target = join.target.definition().collection,
      column = join.column,
    ));
  }

  format!(
    "SELECT {columns}
     FROM {WORK_ORDER_COLLECTION} d
     {joins}
     WHERE d.{ACTIVE_FILTER}
     ORDER BY d.created_at DESC, d.rowid DESC",
    columns = columns.join(", "),
    joins = joins.join("\n     "),
  )
}

/// Insert of `id, created_at, date, dmt_closed` and every join column.
pub fn insert_work_order() -> String {
  let columns: Vec<&str> = ["date", "dmt_closed"]
    .into_iter()
    .chain(WORK_ORDER_JOINS.iter().map(|j| j.column))
    .collect();
  insert_into(WORK_ORDER_COLLECTION, &columns)
}
