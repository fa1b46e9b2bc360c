//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use qms_core::{
  record::{NewRecord, SoftDelete},
  registry::{EntityKey, definitions},
  store::RecordStore,
  work_order::{NewWorkOrder, Role, WorkOrderInsert},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_record(entity: EntityKey, values: &[(&'static str, &str)]) -> NewRecord {
  NewRecord {
    entity,
    values: values.iter().map(|(k, v)| (*k, v.to_string())).collect(),
  }
}

async fn employee(s: &SqliteStore, name: &str) -> Uuid {
  s.insert(new_record(EntityKey::Employees, &[("name", name)]))
    .await
    .unwrap()
    .id
}

async fn work_order(s: &SqliteStore, input: NewWorkOrder) -> Uuid {
  s.insert_work_order(input)
    .await
    .unwrap()
    .created()
    .expect("work order created")
}

fn names(records: &[qms_core::record::Record], field: &str) -> Vec<String> {
  records
    .iter()
    .map(|r| r.value(field).unwrap_or_default().to_string())
    .collect()
}

// ─── Registry collections ────────────────────────────────────────────────────

#[tokio::test]
async fn every_registered_entity_accepts_its_full_field_set() {
  let s = store().await;

  for definition in definitions() {
    let values: Vec<(&'static str, &str)> =
      definition.fields.iter().map(|f| (f.name, "value")).collect();
    let record = s.insert(new_record(definition.key, &values)).await.unwrap();
    assert_eq!(record.values.len(), definition.fields.len());

    let listed = s.list_active(definition).await.unwrap();
    assert_eq!(listed.len(), 1, "{}", definition.key);
    assert_eq!(listed[0], record);
  }
}

#[tokio::test]
async fn list_is_ordered_by_display_field() {
  let s = store().await;
  for name in ["Zed", "Ada", "Mia"] {
    employee(&s, name).await;
  }

  let listed = s
    .list_active(EntityKey::Employees.definition())
    .await
    .unwrap();
  assert_eq!(names(&listed, "name"), ["Ada", "Mia", "Zed"]);
}

#[tokio::test]
async fn part_numbers_sort_by_part_number() {
  let s = store().await;
  for pn in ["PN-300", "PN-100", "PN-200"] {
    s.insert(new_record(EntityKey::PartNumbers, &[("part_number", pn)]))
      .await
      .unwrap();
  }

  let listed = s
    .list_active(EntityKey::PartNumbers.definition())
    .await
    .unwrap();
  assert_eq!(names(&listed, "part_number"), ["PN-100", "PN-200", "PN-300"]);
}

#[tokio::test]
async fn display_ties_keep_insertion_order() {
  let s = store().await;
  let first = employee(&s, "Sam").await;
  let second = employee(&s, "Sam").await;

  let listed = s
    .list_active(EntityKey::Employees.definition())
    .await
    .unwrap();
  let ids: Vec<Uuid> = listed.iter().map(|r| r.id).collect();
  assert_eq!(ids, [first, second]);
}

#[tokio::test]
async fn identifiers_are_stable_across_reads() {
  let s = store().await;
  let id = employee(&s, "Ada").await;

  for _ in 0..3 {
    let listed = s
      .list_active(EntityKey::Employees.definition())
      .await
      .unwrap();
    assert_eq!(listed[0].id, id);
  }
}

#[tokio::test]
async fn inactive_rows_are_never_listed() {
  let s = store().await;
  let gone = employee(&s, "Gone").await;
  employee(&s, "Kept").await;

  let outcome = s.soft_delete_in("employees", gone).await.unwrap();
  assert_eq!(outcome, SoftDelete::Deactivated);

  let listed = s
    .list_active(EntityKey::Employees.definition())
    .await
    .unwrap();
  assert_eq!(names(&listed, "name"), ["Kept"]);
  assert!(listed.iter().all(|r| r.state.is_active()));
}

#[tokio::test]
async fn optional_fields_may_be_absent() {
  let s = store().await;
  s.insert(new_record(EntityKey::Customers, &[("name", "Acme")]))
    .await
    .unwrap();

  let listed = s
    .list_active(EntityKey::Customers.definition())
    .await
    .unwrap();
  assert_eq!(listed[0].value("name"), Some("Acme"));
  assert_eq!(listed[0].value("code"), None);
}

#[tokio::test]
async fn undeclared_fields_never_reach_storage() {
  let s = store().await;
  let record = s
    .insert(new_record(EntityKey::Workcenters, &[
      ("name", "Paint"),
      ("email", "not-a-workcenter-field"),
    ]))
    .await
    .unwrap();
  assert!(!record.values.contains_key("email"));

  let listed = s
    .list_active(EntityKey::Workcenters.definition())
    .await
    .unwrap();
  assert_eq!(listed[0].values.len(), 1);
}

#[tokio::test]
async fn insert_without_display_field_fails_atomically() {
  let s = store().await;
  let err = s
    .insert(new_record(EntityKey::InspectionItems, &[(
      "description",
      "orphan",
    )]))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));

  let listed = s
    .list_active(EntityKey::InspectionItems.definition())
    .await
    .unwrap();
  assert!(listed.is_empty());
}

// ─── Work orders ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn work_order_roles_resolve_independently() {
  let s = store().await;
  let ada = employee(&s, "Ada").await;
  let bob = employee(&s, "Bob").await;
  let part = s
    .insert(new_record(EntityKey::PartNumbers, &[("part_number", "PN-7")]))
    .await
    .unwrap()
    .id;

  let mut input = NewWorkOrder {
    date: NaiveDate::from_ymd_opt(2024, 5, 1),
    ..Default::default()
  };
  input.references.insert(Role::PartNumber, part);
  input.references.insert(Role::Employee, bob);
  input.references.insert(Role::PreparedBy, ada);
  input.references.insert(Role::DispositionApprovedBy, ada);
  let id = work_order(&s, input).await;

  let orders = s.list_active_work_orders().await.unwrap();
  assert_eq!(orders.len(), 1);
  let order = &orders[0];
  assert_eq!(order.id, id);
  assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 5, 1));
  assert!(!order.closed);
  assert_eq!(order.part_number.as_ref().unwrap().label, "PN-7");
  assert_eq!(order.employee.as_ref().unwrap().label, "Bob");
  assert_eq!(order.prepared_by.as_ref().unwrap().label, "Ada");
  assert_eq!(order.prepared_by.as_ref().unwrap().id, ada);
  assert_eq!(order.disposition_approved_by.as_ref().unwrap().label, "Ada");
  assert!(order.customer.is_none());
  assert!(order.workcenter.is_none());
  assert!(order.inspection_item.is_none());
}

#[tokio::test]
async fn work_order_without_references_lists_cleanly() {
  let s = store().await;
  work_order(&s, NewWorkOrder::default()).await;

  let orders = s.list_active_work_orders().await.unwrap();
  assert_eq!(orders.len(), 1);
  assert!(orders[0].date.is_none());
  for role in [Role::Workcenter, Role::Customer, Role::PreparedBy] {
    assert!(orders[0].reference(role).is_none());
  }
}

#[tokio::test]
async fn work_orders_list_newest_first() {
  let s = store().await;
  let first = work_order(&s, NewWorkOrder::default()).await;
  let second = work_order(&s, NewWorkOrder::default()).await;

  let ids: Vec<Uuid> = s
    .list_active_work_orders()
    .await
    .unwrap()
    .iter()
    .map(|o| o.id)
    .collect();
  assert_eq!(ids, [second, first]);
}

#[tokio::test]
async fn work_order_reports_unknown_reference() {
  let s = store().await;
  let ada = employee(&s, "Ada").await;
  let ghost = Uuid::new_v4();
  let mut input = NewWorkOrder::default();
  input.references.insert(Role::PreparedBy, ada);
  input.references.insert(Role::Customer, ghost);

  let outcome = s.insert_work_order(input).await.unwrap();
  let WorkOrderInsert::UnknownReference { join, id } = outcome else {
    panic!("expected unknown reference, got {outcome:?}");
  };
  assert_eq!(join.role, Role::Customer);
  assert_eq!(id, ghost);
  assert!(s.list_active_work_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn work_order_may_reference_inactive_row() {
  let s = store().await;
  let ada = employee(&s, "Ada").await;
  s.soft_delete_in("employees", ada).await.unwrap();

  let mut input = NewWorkOrder::default();
  input.references.insert(Role::Employee, ada);
  assert!(s.insert_work_order(input).await.unwrap().created().is_some());
}

#[tokio::test]
async fn soft_delete_is_idempotent() {
  let s = store().await;
  let id = work_order(&s, NewWorkOrder::default()).await;
  let kept = work_order(&s, NewWorkOrder::default()).await;

  assert_eq!(
    s.soft_delete_work_order(id).await.unwrap(),
    SoftDelete::Deactivated
  );
  assert_eq!(
    s.soft_delete_work_order(id).await.unwrap(),
    SoftDelete::AlreadyInactive
  );

  let ids: Vec<Uuid> = s
    .list_active_work_orders()
    .await
    .unwrap()
    .iter()
    .map(|o| o.id)
    .collect();
  assert_eq!(ids, [kept]);
}

#[tokio::test]
async fn soft_delete_of_unknown_id_is_a_no_op() {
  let s = store().await;
  work_order(&s, NewWorkOrder::default()).await;

  assert_eq!(
    s.soft_delete_work_order(Uuid::new_v4()).await.unwrap(),
    SoftDelete::Missing
  );
  assert_eq!(s.list_active_work_orders().await.unwrap().len(), 1);
}

#[tokio::test]
async fn deactivated_employee_keeps_historical_label() {
  let s = store().await;
  let ada = employee(&s, "Ada").await;
  let mut input = NewWorkOrder::default();
  input.references.insert(Role::PreparedBy, ada);
  work_order(&s, input).await;

  s.soft_delete_in("employees", ada).await.unwrap();

  let orders = s.list_active_work_orders().await.unwrap();
  assert_eq!(orders[0].prepared_by.as_ref().unwrap().label, "Ada");
}
