//! Work-order (DMT) records and the joins that decorate them.
//!
//! A work order references five registry collections by foreign key. The
//! employees collection is referenced three times under different roles, so
//! every join is described by a [`JoinSpec`] naming its role rather than its
//! target table.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use uuid::Uuid;

use crate::{
  Error, Result,
  record::{FieldMap, RecordState},
  registry::EntityKey,
};

/// Backing table for work orders.
pub const WORK_ORDER_COLLECTION: &str = "dmt_records";

// ─── Joins ───────────────────────────────────────────────────────────────────

/// The semantic role of a reference held by a work order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
  Workcenter,
  PartNumber,
  Employee,
  Customer,
  InspectionItem,
  PreparedBy,
  DispositionApprovedBy,
}

/// A named foreign-key reference from `dmt_records` into a registry
/// collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinSpec {
  pub role:   Role,
  /// Foreign-key column on `dmt_records`.
  pub column: &'static str,
  pub target: EntityKey,
}

impl JoinSpec {
  /// SQL alias for the joined table; unique per role.
  pub fn alias(&self) -> &'static str {
    match self.role {
      Role::Workcenter => "workcenter",
      Role::PartNumber => "part_number",
      Role::Employee => "employee",
      Role::Customer => "customer",
      Role::InspectionItem => "inspection_item",
      Role::PreparedBy => "prepared_by",
      Role::DispositionApprovedBy => "disposition_approved_by",
    }
  }

  /// The single column read from the target; never the full row.
  pub fn projection(&self) -> &'static str { self.target.definition().display_field }
}

/// Every reference a work order carries, in display order.
pub static WORK_ORDER_JOINS: [JoinSpec; 7] = [
  JoinSpec {
    role:   Role::Workcenter,
    column: "workcenter_id",
    target: EntityKey::Workcenters,
  },
  JoinSpec {
    role:   Role::PartNumber,
    column: "part_number_id",
    target: EntityKey::PartNumbers,
  },
  JoinSpec {
    role:   Role::Employee,
    column: "employee_id",
    target: EntityKey::Employees,
  },
  JoinSpec {
    role:   Role::Customer,
    column: "customer_id",
    target: EntityKey::Customers,
  },
  JoinSpec {
    role:   Role::InspectionItem,
    column: "inspection_item_id",
    target: EntityKey::InspectionItems,
  },
  JoinSpec {
    role:   Role::PreparedBy,
    column: "prepared_by_id",
    target: EntityKey::Employees,
  },
  JoinSpec {
    role:   Role::DispositionApprovedBy,
    column: "disposition_approved_by_id",
    target: EntityKey::Employees,
  },
];

// ─── Records ─────────────────────────────────────────────────────────────────

/// A read-only projection of a referenced row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
  pub id:    Uuid,
  pub label: String,
}

/// A work order with its references resolved.
///
/// Each role is an independent field; a missing or dangling foreign key is
/// `None`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
  pub id:                      Uuid,
  pub date:                    Option<NaiveDate>,
  pub closed:                  bool,
  pub workcenter:              Option<Reference>,
  pub part_number:             Option<Reference>,
  pub employee:                Option<Reference>,
  pub customer:                Option<Reference>,
  pub inspection_item:         Option<Reference>,
  pub prepared_by:             Option<Reference>,
  pub disposition_approved_by: Option<Reference>,
  pub state:                   RecordState,
  pub created_at:              DateTime<Utc>,
}

impl WorkOrder {
  pub fn new(id: Uuid, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      date: None,
      closed: false,
      workcenter: None,
      part_number: None,
      employee: None,
      customer: None,
      inspection_item: None,
      prepared_by: None,
      disposition_approved_by: None,
      state: RecordState::Active,
      created_at,
    }
  }

  fn slot(&mut self, role: Role) -> &mut Option<Reference> {
    match role {
      Role::Workcenter => &mut self.workcenter,
      Role::PartNumber => &mut self.part_number,
      Role::Employee => &mut self.employee,
      Role::Customer => &mut self.customer,
      Role::InspectionItem => &mut self.inspection_item,
      Role::PreparedBy => &mut self.prepared_by,
      Role::DispositionApprovedBy => &mut self.disposition_approved_by,
    }
  }

  pub fn reference(&self, role: Role) -> Option<&Reference> {
    match role {
      Role::Workcenter => self.workcenter.as_ref(),
      Role::PartNumber => self.part_number.as_ref(),
      Role::Employee => self.employee.as_ref(),
      Role::Customer => self.customer.as_ref(),
      Role::InspectionItem => self.inspection_item.as_ref(),
      Role::PreparedBy => self.prepared_by.as_ref(),
      Role::DispositionApprovedBy => self.disposition_approved_by.as_ref(),
    }
  }

  pub fn set_reference(&mut self, role: Role, reference: Option<Reference>) {
    *self.slot(role) = reference;
  }
}

/// Outcome of a work-order insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkOrderInsert {
  Created(Uuid),
  /// `id` names no row of the join's target; nothing was written.
  UnknownReference { join: &'static JoinSpec, id: Uuid },
}

impl WorkOrderInsert {
  pub fn created(self) -> Option<Uuid> {
    match self {
      Self::Created(id) => Some(id),
      Self::UnknownReference { .. } => None,
    }
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Input for a work-order create.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWorkOrder {
  pub date:       Option<NaiveDate>,
  pub closed:     bool,
  pub references: BTreeMap<Role, Uuid>,
}

impl NewWorkOrder {
  /// Parse a submitted form. Only the join columns, `date` and `dmt_closed`
  /// are read; blank values mean "no reference".
  pub fn from_fields(raw: &FieldMap) -> Result<Self> {
    let present = |name: &str| {
      raw.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
    };

    let mut references = BTreeMap::new();
    for join in &WORK_ORDER_JOINS {
      if let Some(value) = present(join.column) {
        let id = Uuid::parse_str(value).map_err(|_| Error::InvalidReference {
          field: join.column,
          value: value.to_owned(),
        })?;
        references.insert(join.role, id);
      }
    }

    let date = present("date")
      .map(|d| {
        NaiveDate::parse_from_str(d, "%Y-%m-%d")
          .map_err(|_| Error::InvalidDate(d.to_owned()))
      })
      .transpose()?;

    let closed = present("dmt_closed")
      .is_some_and(|v| matches!(v, "on" | "true" | "1"));

    Ok(Self { date, closed, references })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn join_aliases_and_columns_are_unique() {
    let aliases: HashSet<_> = WORK_ORDER_JOINS.iter().map(JoinSpec::alias).collect();
    let columns: HashSet<_> = WORK_ORDER_JOINS.iter().map(|j| j.column).collect();
    assert_eq!(aliases.len(), WORK_ORDER_JOINS.len());
    assert_eq!(columns.len(), WORK_ORDER_JOINS.len());
    for join in &WORK_ORDER_JOINS {
      assert_eq!(join.alias(), join.role.as_ref());
    }
  }

  #[test]
  fn people_are_joined_under_three_roles() {
    let roles: Vec<Role> = WORK_ORDER_JOINS
      .iter()
      .filter(|j| j.target == EntityKey::Employees)
      .map(|j| j.role)
      .collect();
    assert_eq!(roles, vec![
      Role::Employee,
      Role::PreparedBy,
      Role::DispositionApprovedBy,
    ]);
    assert!(
      WORK_ORDER_JOINS
        .iter()
        .filter(|j| j.target == EntityKey::Employees)
        .all(|j| j.projection() == "name")
    );
  }

  #[test]
  fn part_numbers_project_their_code() {
    let join = WORK_ORDER_JOINS
      .iter()
      .find(|j| j.role == Role::PartNumber)
      .unwrap();
    assert_eq!(join.projection(), "part_number");
  }

  #[test]
  fn from_fields_parses_references_and_flags() {
    let ada = Uuid::new_v4();
    let raw: FieldMap = [
      ("prepared_by_id", ada.to_string()),
      ("disposition_approved_by_id", ada.to_string()),
      ("customer_id", "".to_string()),
      ("date", "2024-03-05".to_string()),
      ("dmt_closed", "on".to_string()),
      ("is_active", "false".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let input = NewWorkOrder::from_fields(&raw).unwrap();
    assert_eq!(input.references.len(), 2);
    assert_eq!(input.references[&Role::PreparedBy], ada);
    assert_eq!(input.references[&Role::DispositionApprovedBy], ada);
    assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 3, 5));
    assert!(input.closed);
  }

  #[test]
  fn from_fields_rejects_malformed_reference() {
    let raw: FieldMap =
      [("part_number_id".to_string(), "PN-1".to_string())].into();
    let err = NewWorkOrder::from_fields(&raw).unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidReference { field: "part_number_id", .. }
    ));
  }

  #[test]
  fn set_reference_addresses_roles_independently() {
    let mut order = WorkOrder::new(Uuid::new_v4(), Utc::now());
    let r = Reference { id: Uuid::new_v4(), label: "Ada".into() };
    order.set_reference(Role::PreparedBy, Some(r.clone()));
    assert_eq!(order.prepared_by, Some(r));
    assert!(order.reference(Role::DispositionApprovedBy).is_none());
  }
}
