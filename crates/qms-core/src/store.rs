//! The `RecordStore` trait, the storage collaborator behind every request.
//!
//! The trait is implemented by storage backends (e.g. `qms-store-sqlite`).
//! The web layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  record::{NewRecord, Record, SoftDelete},
  registry::EntityDefinition,
  work_order::{NewWorkOrder, WorkOrder, WorkOrderInsert},
};

/// Abstraction over a QMS storage backend.
///
/// Every read applies the active-record filter; there is no way to list
/// inactive rows. Deletes are soft: they clear the active flag and never
/// remove a row.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Registry collections ──────────────────────────────────────────────

  /// Active rows of `definition`'s collection, ordered by its display field
  /// ascending, ties in insertion order.
  fn list_active(
    &self,
    definition: &'static EntityDefinition,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Insert one row. The identifier and `created_at` are assigned by the
  /// store; the row is written completely or not at all.
  fn insert(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  // ── Work orders ───────────────────────────────────────────────────────

  /// Active work orders with every reference resolved, newest first.
  fn list_active_work_orders(
    &self,
  ) -> impl Future<Output = Result<Vec<WorkOrder>, Self::Error>> + Send + '_;

  /// Insert one work order.
  ///
  /// Every reference must name an existing row of its target (active or
  /// not). Otherwise nothing is written and the offending join is reported.
  fn insert_work_order(
    &self,
    input: NewWorkOrder,
  ) -> impl Future<Output = Result<WorkOrderInsert, Self::Error>> + Send + '_;

  /// Clear the active flag of one work order.
  ///
  /// Deleting an inactive or unknown identifier is not an error; the
  /// returned [`SoftDelete`] says which case applied.
  fn soft_delete_work_order(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<SoftDelete, Self::Error>> + Send + '_;
}
