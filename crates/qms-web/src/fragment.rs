//! Fragment rendering.
//!
//! Every function here is pure: it turns records (or an error) into the
//! markup for exactly one page region. Nothing here touches the store.

use std::collections::BTreeMap;

use qms_core::{
  record::Record,
  registry::{EntityDefinition, EntityKey},
  work_order::{Reference, Role, WORK_ORDER_JOINS, WorkOrder},
};

use crate::markup::Markup;

/// Placeholder for a reference or value that is not set.
pub const PLACEHOLDER: &str = "N/A";

const MAIN: &str = "#main-content";

const CARD: &str = "bg-white rounded-xl shadow-xl p-8";
const BACK_BUTTON: &str =
  "mt-6 bg-gray-500 hover:bg-gray-600 text-white font-semibold py-2 px-6 rounded-lg transition";
const ROW: &str = "bg-gradient-to-r from-gray-50 to-gray-100 rounded-xl p-5 flex items-center \
                   justify-between hover:shadow-lg transition-all border-2 border-transparent \
                   hover:border-blue-200";
const INPUT: &str = "w-full px-4 py-3 border-2 border-gray-300 rounded-lg focus:outline-none \
                     focus:ring-2 focus:ring-blue-500";
const SUBMIT: &str = "bg-gradient-to-r from-green-500 to-green-600 hover:from-green-600 \
                      hover:to-green-700 text-white font-semibold py-3 px-8 rounded-lg shadow-lg";

/// DOM id of the list region for an entity; the create form targets it.
pub fn list_region_id(definition: &EntityDefinition) -> String {
  format!("{}-list", definition.key)
}

// ─── Navigation ──────────────────────────────────────────────────────────────

pub fn render_home() -> String {
  let mut m = Markup::new();
  m.open("div", &[("class", "text-center py-12")])
    .element(
      "p",
      &[("class", "text-xl text-gray-600")],
      "Welcome to the Quality Management System",
    )
    .element(
      "p",
      &[("class", "text-gray-500 mt-4")],
      "Select an option from the menu above to get started",
    )
    .close("div");
  m.finish()
}

/// One navigation button per registered entity.
pub fn render_general_info(definitions: &[&EntityDefinition]) -> String {
  let mut m = Markup::new();
  m.open("div", &[("class", "bg-white rounded-xl shadow-xl p-6")])
    .element(
      "h2",
      &[("class", "text-3xl font-bold text-gray-800 mb-6")],
      "General Information Management",
    )
    .open("div", &[("class", "grid grid-cols-2 md:grid-cols-5 gap-4 mb-4")]);

  for definition in definitions {
    let href = format!("/entity/{}", definition.key);
    let color = definition.meta.color;
    let class = format!(
      "bg-gradient-to-br from-{color}-500 to-{color}-600 hover:from-{color}-600 \
       hover:to-{color}-700 text-white font-semibold py-6 px-4 rounded-xl shadow-lg"
    );
    m.open("button", &[
      ("hx-get", href.as_str()),
      ("hx-target", MAIN),
      ("hx-swap", "innerHTML"),
      ("class", class.as_str()),
    ])
    .element("div", &[("class", "text-3xl mb-2")], definition.meta.icon)
    .text(definition.meta.plural)
    .close("button");
  }

  m.close("div");
  back_button(&mut m, "/home", "← Back");
  m.close("div");
  m.finish()
}

// ─── Entity management ───────────────────────────────────────────────────────

/// The management card for one entity: header, create form and list region.
pub fn render_entity_page(
  definition: &EntityDefinition,
  records: &[Record],
) -> String {
  let meta = &definition.meta;
  let region = list_region_id(definition);
  let action = format!("/entity/{}/create", definition.key);
  let target = format!("#{region}");

  let mut m = Markup::new();
  m.open("div", &[("class", CARD)])
    .open("div", &[("class", "flex items-center gap-3 mb-6")])
    .element("span", &[("class", "text-4xl")], meta.icon)
    .element(
      "h3",
      &[("class", "text-3xl font-bold text-gray-800")],
      &format!("{} Management", meta.label),
    )
    .close("div");

  m.open("div", &[(
    "class",
    "bg-gradient-to-br from-blue-50 to-blue-100 rounded-xl p-6 mb-6 border-2 border-blue-200",
  )])
  .element(
    "h4",
    &[("class", "font-bold text-gray-800 mb-4 text-lg")],
    &format!("➕ Add New {}", meta.label),
  )
  .open("form", &[
    ("hx-post", action.as_str()),
    ("hx-target", target.as_str()),
    ("hx-swap", "outerHTML"),
    ("class", "space-y-3"),
  ]);

  for field in definition.fields {
    m.open("div", &[]).element(
      "label",
      &[
        ("for", field.name),
        ("class", "block text-sm font-semibold text-gray-700 mb-2"),
      ],
      field.label,
    );
    let mut attrs = vec![
      ("type", "text"),
      ("id", field.name),
      ("name", field.name),
      ("class", INPUT),
    ];
    if field.required {
      attrs.push(("required", "required"));
    }
    m.void("input", &attrs).close("div");
  }

  m.open("div", &[("class", "flex gap-3")])
    .element("button", &[("type", "submit"), ("class", SUBMIT)], "✓ Add")
    .element(
      "button",
      &[
        ("type", "reset"),
        (
          "class",
          "bg-gray-400 hover:bg-gray-500 text-white font-semibold py-3 px-6 rounded-lg",
        ),
      ],
      "✕ Cancel",
    )
    .close("div")
    .close("form")
    .close("div");

  write_list(&mut m, definition, records);
  back_button(&mut m, "/general-info", "← Back");
  m.close("div");
  m.finish()
}

/// The list region for an entity. Falls back to [`render_empty`] when there
/// are no records.
pub fn render_list(definition: &EntityDefinition, records: &[Record]) -> String {
  let mut m = Markup::new();
  write_list(&mut m, definition, records);
  m.finish()
}

/// The list region with its "no items" placeholder.
pub fn render_empty(definition: &EntityDefinition) -> String {
  render_list(definition, &[])
}

fn write_list(m: &mut Markup, definition: &EntityDefinition, records: &[Record]) {
  let region = list_region_id(definition);
  m.open("div", &[("id", region.as_str()), ("class", "space-y-3")]);

  if records.is_empty() {
    empty_state(m, "No items found");
  }

  for record in records {
    m.open("div", &[("class", ROW)])
      .open("div", &[("class", "flex-1")])
      .open("div", &[("class", "flex items-center gap-3 mb-2")])
      .element(
        "span",
        &[(
          "class",
          "font-mono text-xs bg-blue-100 text-blue-700 px-3 py-1 rounded-full font-bold",
        )],
        &record.short_id(),
      )
      .close("div");

    for field in definition.fields {
      if let Some(value) = record.value(field.name) {
        m.element("p", &[("class", "font-bold text-gray-800")], value);
      }
    }

    m.close("div").close("div");
  }

  m.close("div");
}

// ─── Work orders ─────────────────────────────────────────────────────────────

const TABLE_ROLES: [(Role, &str); 5] = [
  (Role::PartNumber, "Part Number"),
  (Role::Customer, "Customer"),
  (Role::Employee, "Employee"),
  (Role::PreparedBy, "Prepared By"),
  (Role::DispositionApprovedBy, "Approved By"),
];

/// The work-order card: header, table (or empty state) and navigation.
pub fn render_work_orders(orders: &[WorkOrder]) -> String {
  let mut m = Markup::new();
  m.open("div", &[("class", CARD)])
    .open("div", &[("class", "flex items-center justify-between mb-6")])
    .open("div", &[("class", "flex items-center gap-3")])
    .element("span", &[("class", "text-4xl")], "📈")
    .element(
      "h2",
      &[("class", "text-3xl font-bold text-gray-800")],
      "DMT Records",
    )
    .close("div")
    .element(
      "button",
      &[
        ("hx-get", "/dmt/create"),
        ("hx-target", MAIN),
        ("hx-swap", "innerHTML"),
        ("class", SUBMIT),
      ],
      "➕ New DMT Record",
    )
    .close("div");

  if orders.is_empty() {
    m.open("div", &[("class", "text-center")]);
    empty_state(&mut m, "No DMT records found");
    m.element(
      "button",
      &[
        ("hx-get", "/dmt/create"),
        ("hx-target", MAIN),
        ("hx-swap", "innerHTML"),
        ("class", SUBMIT),
      ],
      "Create First Record",
    )
    .close("div");
  } else {
    write_work_order_table(&mut m, orders);
  }

  back_button(&mut m, "/home", "← Back to Home");
  m.close("div");
  m.finish()
}

fn write_work_order_table(m: &mut Markup, orders: &[WorkOrder]) {
  let th = [("class", "px-6 py-3 text-left text-xs font-bold text-gray-700 uppercase")];
  let td = [("class", "px-6 py-4 text-sm text-gray-800")];

  m.open("div", &[("class", "overflow-x-auto")])
    .open("table", &[("class", "min-w-full bg-white rounded-lg overflow-hidden")])
    .open("thead", &[("class", "bg-gray-100")])
    .open("tr", &[])
    .element("th", &th, "DMT ID");
  for (_, heading) in TABLE_ROLES {
    m.element("th", &th, heading);
  }
  m.element("th", &th, "Date")
    .element("th", &th, "Status")
    .element("th", &th, "Actions")
    .close("tr")
    .close("thead")
    .open("tbody", &[("class", "divide-y divide-gray-200")]);

  for order in orders {
    let id = order.id.to_string();
    let delete = format!("/dmt/delete/{id}");
    let date = order.date.map(|d| d.to_string());
    let (status, status_class) = if order.closed {
      ("Closed", "px-3 py-1 rounded-full text-xs font-semibold bg-green-100 text-green-700")
    } else {
      ("Open", "px-3 py-1 rounded-full text-xs font-semibold bg-yellow-100 text-yellow-700")
    };

    m.open("tr", &[("class", "hover:bg-blue-50 transition")]).element(
      "td",
      &[("class", "px-6 py-4 text-sm font-mono text-blue-600")],
      &id,
    );
    for (role, _) in TABLE_ROLES {
      m.element("td", &td, reference_label(order.reference(role)));
    }
    m.element("td", &td, date.as_deref().unwrap_or(PLACEHOLDER))
      .open("td", &[("class", "px-6 py-4")])
      .element("span", &[("class", status_class)], status)
      .close("td")
      .open("td", &[("class", "px-6 py-4")])
      .element(
        "button",
        &[
          ("hx-delete", delete.as_str()),
          ("hx-target", "closest tr"),
          ("hx-swap", "outerHTML"),
          ("hx-confirm", "Are you sure you want to delete this DMT record?"),
          (
            "class",
            "bg-red-500 hover:bg-red-600 text-white font-semibold py-1 px-3 rounded text-xs",
          ),
        ],
        "Delete",
      )
      .close("td")
      .close("tr");
  }

  m.close("tbody").close("table").close("div");
}

fn reference_label(reference: Option<&Reference>) -> &str {
  reference.map_or(PLACEHOLDER, |r| r.label.as_str())
}

/// The work-order create form. `options` holds the active records of every
/// referenced collection; each role gets a select over its target.
pub fn render_work_order_form(options: &BTreeMap<EntityKey, Vec<Record>>) -> String {
  let mut m = Markup::new();
  m.open("div", &[("class", CARD)])
    .element(
      "h2",
      &[("class", "text-3xl font-bold text-gray-800 mb-6")],
      "➕ New DMT Record",
    )
    .open("form", &[
      ("hx-post", "/dmt/create"),
      ("hx-target", MAIN),
      ("hx-swap", "innerHTML"),
      ("class", "grid grid-cols-1 md:grid-cols-2 gap-4"),
    ]);

  for join in &WORK_ORDER_JOINS {
    let target = join.target.definition();
    let label = role_label(join.role);
    m.open("div", &[])
      .element(
        "label",
        &[
          ("for", join.column),
          ("class", "block text-sm font-semibold text-gray-700 mb-2"),
        ],
        label,
      )
      .open("select", &[
        ("id", join.column),
        ("name", join.column),
        ("class", INPUT),
      ])
      .element("option", &[("value", "")], "—");

    for record in options.get(&join.target).map(Vec::as_slice).unwrap_or_default() {
      let value = record.id.to_string();
      let text = record.value(target.display_field).unwrap_or(PLACEHOLDER);
      m.element("option", &[("value", value.as_str())], text);
    }

    m.close("select").close("div");
  }

  m.open("div", &[])
    .element(
      "label",
      &[
        ("for", "date"),
        ("class", "block text-sm font-semibold text-gray-700 mb-2"),
      ],
      "Date",
    )
    .void("input", &[
      ("type", "date"),
      ("id", "date"),
      ("name", "date"),
      ("class", INPUT),
    ])
    .close("div")
    .open("div", &[("class", "flex items-center gap-2")])
    .void("input", &[
      ("type", "checkbox"),
      ("id", "dmt_closed"),
      ("name", "dmt_closed"),
    ])
    .element("label", &[("for", "dmt_closed")], "Closed")
    .close("div")
    .open("div", &[("class", "md:col-span-2 flex gap-3")])
    .element("button", &[("type", "submit"), ("class", SUBMIT)], "✓ Save")
    .close("div")
    .close("form");

  back_button(&mut m, "/dmt/list", "← Back");
  m.close("div");
  m.finish()
}

fn role_label(role: Role) -> &'static str {
  match role {
    Role::Workcenter => "Workcenter",
    Role::PartNumber => "Part Number",
    Role::Employee => "Employee",
    Role::Customer => "Customer",
    Role::InspectionItem => "Inspection Item",
    Role::PreparedBy => "Prepared By",
    Role::DispositionApprovedBy => "Disposition Approved By",
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// An error card. `context` says what failed, `message` why.
pub fn render_error(context: &str, message: &str) -> String {
  let mut m = Markup::new();
  m.open("div", &[(
    "class",
    "bg-red-50 border-2 border-red-200 rounded-xl p-6 text-center",
  )])
  .element("p", &[("class", "text-red-700 font-semibold")], context)
  .element("p", &[("class", "text-sm text-red-600 mt-2")], message)
  .close("div");
  m.finish()
}

// ─── Shared pieces ───────────────────────────────────────────────────────────

fn back_button(m: &mut Markup, href: &str, label: &str) {
  m.element(
    "button",
    &[
      ("hx-get", href),
      ("hx-target", MAIN),
      ("hx-swap", "innerHTML"),
      ("class", BACK_BUTTON),
    ],
    label,
  );
}

fn empty_state(m: &mut Markup, message: &str) {
  m.open("div", &[("class", "text-center py-12 text-gray-400")])
    .element("div", &[("class", "text-4xl mb-2")], "📭")
    .element("p", &[("class", "text-lg")], message)
    .close("div");
}
