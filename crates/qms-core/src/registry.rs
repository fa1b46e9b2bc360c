//! The entity registry: a fixed table mapping entity keys to their backing
//! collection, editable fields, and display metadata.
//!
//! The table is built at compile time and never mutated. Adding an entity
//! means adding an [`EntityKey`] variant and its [`EntityDefinition`] row; no
//! handler or query code changes.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{
  Error, Result,
  record::{FieldMap, NewRecord},
};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Stable identifier selecting a collection and its field schema.
///
/// The string form (`"part_numbers"`, …) is what appears in request paths.
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
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKey {
  Employees,
  Workcenters,
  PartNumbers,
  Customers,
  InspectionItems,
}

impl EntityKey {
  /// The registry row for this key.
  pub fn definition(self) -> &'static EntityDefinition {
    match self {
      Self::Employees => &EMPLOYEES,
      Self::Workcenters => &WORKCENTERS,
      Self::PartNumbers => &PART_NUMBERS,
      Self::Customers => &CUSTOMERS,
      Self::InspectionItems => &INSPECTION_ITEMS,
    }
  }
}

// ─── Definitions ─────────────────────────────────────────────────────────────

/// One editable attribute of an entity.
///
/// Both the create form and the insert builder read this descriptor, so the
/// rendered form can never offer a field the server would drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
  pub name:     &'static str,
  pub label:    &'static str,
  pub required: bool,
}

/// Purely presentational metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMeta {
  pub label:  &'static str,
  pub plural: &'static str,
  pub icon:   &'static str,
  pub color:  &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntityDefinition {
  pub key:           EntityKey,
  /// Backing table name.
  pub collection:    &'static str,
  /// Editable fields in form/display order.
  pub fields:        &'static [FieldDescriptor],
  /// Sort key for listings, and the column projected when another
  /// collection joins to this one.
  pub display_field: &'static str,
  pub meta:          DisplayMeta,
}

const fn field(name: &'static str, label: &'static str) -> FieldDescriptor {
  FieldDescriptor { name, label, required: false }
}

const fn required(name: &'static str, label: &'static str) -> FieldDescriptor {
  FieldDescriptor { name, label, required: true }
}

static EMPLOYEES: EntityDefinition = EntityDefinition {
  key:           EntityKey::Employees,
  collection:    "employees",
  fields:        &[required("name", "Name"), field("email", "Email")],
  display_field: "name",
  meta:          DisplayMeta {
    label:  "Employee",
    plural: "Employees",
    icon:   "👤",
    color:  "blue",
  },
};

static WORKCENTERS: EntityDefinition = EntityDefinition {
  key:           EntityKey::Workcenters,
  collection:    "workcenters",
  fields:        &[required("name", "Name"), field("code", "Code")],
  display_field: "name",
  meta:          DisplayMeta {
    label:  "Workcenter",
    plural: "Workcenters",
    icon:   "🏢",
    color:  "green",
  },
};

static PART_NUMBERS: EntityDefinition = EntityDefinition {
  key:           EntityKey::PartNumbers,
  collection:    "part_numbers",
  fields:        &[
    required("part_number", "Part number"),
    field("description", "Description"),
  ],
  display_field: "part_number",
  meta:          DisplayMeta {
    label:  "Part Number",
    plural: "Part Numbers",
    icon:   "🔧",
    color:  "orange",
  },
};

static CUSTOMERS: EntityDefinition = EntityDefinition {
  key:           EntityKey::Customers,
  collection:    "customers",
  fields:        &[required("name", "Name"), field("code", "Code")],
  display_field: "name",
  meta:          DisplayMeta {
    label:  "Customer",
    plural: "Customers",
    icon:   "🏪",
    color:  "red",
  },
};

static INSPECTION_ITEMS: EntityDefinition = EntityDefinition {
  key:           EntityKey::InspectionItems,
  collection:    "inspection_items",
  fields:        &[
    required("name", "Name"),
    field("description", "Description"),
  ],
  display_field: "name",
  meta:          DisplayMeta {
    label:  "Inspection Item",
    plural: "Inspection Items",
    icon:   "🔍",
    color:  "teal",
  },
};

/// Every registered entity, in navigation order.
static REGISTRY: [&EntityDefinition; 5] =
  [&EMPLOYEES, &WORKCENTERS, &PART_NUMBERS, &CUSTOMERS, &INSPECTION_ITEMS];

/// All registry rows, in navigation order.
pub fn definitions() -> &'static [&'static EntityDefinition] { &REGISTRY }

/// Look up an entity by its path key.
///
/// Unknown keys yield [`Error::UnknownEntity`] so callers can answer with a
/// not-found fragment instead of a generic failure.
pub fn resolve(key: &str) -> Result<&'static EntityDefinition> {
  key
    .parse::<EntityKey>()
    .map(EntityKey::definition)
    .map_err(|_| Error::UnknownEntity(key.to_owned()))
}

impl EntityDefinition {
  pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
    self.fields.iter().find(|f| f.name == name)
  }

  /// Build the insert set for a create request.
  ///
  /// Only declared fields are read from `raw`; every other key is dropped.
  /// Blank values are treated as absent, others are kept exactly as
  /// submitted. A missing or blank `required` field fails the whole build.
  pub fn build_insert(&self, raw: &FieldMap) -> Result<NewRecord> {
    let mut values = Vec::with_capacity(self.fields.len());

    for descriptor in self.fields {
      let value = raw
        .get(descriptor.name)
        .filter(|v| !v.trim().is_empty());

      match value {
        Some(v) => values.push((descriptor.name, v.clone())),
        None if descriptor.required => {
          return Err(Error::MissingField {
            entity: self.key,
            field:  descriptor.name,
          });
        }
        None => {}
      }
    }

    Ok(NewRecord { entity: self.key, values })
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use strum::IntoEnumIterator as _;

  use super::*;

  fn raw(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<HashMap<_, _>>()
  }

  #[test]
  fn resolves_every_registered_key() {
    for key in EntityKey::iter() {
      let def = resolve(key.as_ref()).unwrap();
      assert_eq!(def.key, key);
      assert_eq!(key.definition().key, key);
    }
  }

  #[test]
  fn unknown_key_is_distinguishable() {
    let err = resolve("suppliers").unwrap_err();
    assert!(matches!(err, Error::UnknownEntity(k) if k == "suppliers"));
  }

  #[test]
  fn registry_rows_are_well_formed() {
    assert_eq!(definitions().len(), EntityKey::iter().count());
    for def in definitions() {
      assert!(def.fields.iter().any(|f| f.required), "{}", def.key);
      assert!(def.field(def.display_field).is_some(), "{}", def.key);
    }
  }

  #[test]
  fn build_insert_drops_undeclared_fields() {
    let def = EntityKey::Employees.definition();
    let input = def
      .build_insert(&raw(&[
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("is_active", "false"),
        ("id", "forged"),
      ]))
      .unwrap();

    assert_eq!(input.entity, EntityKey::Employees);
    assert_eq!(input.values, vec![
      ("name", "Ada".to_string()),
      ("email", "ada@example.com".to_string()),
    ]);
  }

  #[test]
  fn build_insert_skips_blank_optional_fields() {
    let def = EntityKey::PartNumbers.definition();
    let input = def
      .build_insert(&raw(&[("part_number", "  PN-100 "), ("description", "   ")]))
      .unwrap();
    assert_eq!(input.values, vec![("part_number", "  PN-100 ".to_string())]);
  }

  #[test]
  fn build_insert_rejects_blank_required_field() {
    let def = EntityKey::Employees.definition();
    let err = def.build_insert(&raw(&[("name", "  ")])).unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "name", .. }));
  }

  #[test]
  fn build_insert_rejects_missing_required_field() {
    let def = EntityKey::Customers.definition();
    let err = def.build_insert(&raw(&[("code", "C-1")])).unwrap_err();
    assert!(matches!(
      err,
      Error::MissingField { entity: EntityKey::Customers, field: "name" }
    ));
  }
}
