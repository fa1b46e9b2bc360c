//! Request extraction for entity and create handlers.
//!
//! Create requests arrive form-encoded (from htmx) or as a flat JSON object.
//! Either way the handler sees a [`FieldMap`] of untrusted strings; the
//! registry decides what to keep.

use axum::{
  Form, Json,
  extract::{FromRequest, FromRequestParts, Path, Request},
  http::{header, request::Parts},
};
use qms_core::{
  record::FieldMap,
  registry::{self, EntityDefinition},
};
use serde_json::Value;

use crate::error::Error;

/// The registry row named by the `{key}` path segment.
///
/// Resolved from the request head, so an unknown key is rejected as not
/// found before any body extractor runs.
#[derive(Debug)]
pub struct EntityPath(pub &'static EntityDefinition);

impl<S> FromRequestParts<S> for EntityPath
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(key) = Path::<String>::from_request_parts(parts, state)
      .await
      .map_err(|e| Error::BadRequest(e.body_text()))?;
    registry::resolve(&key)
      .map(Self)
      .map_err(|e| Error::core("Error loading entity", e))
  }
}

/// Submitted fields, keyed by name.
#[derive(Debug, Default)]
pub struct Fields(pub FieldMap);

impl<S> FromRequest<S> for Fields
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_json = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("application/json"));

    if is_json {
      let Json(object) =
        Json::<serde_json::Map<String, Value>>::from_request(req, state)
          .await
          .map_err(|e| Error::BadRequest(e.body_text()))?;
      Ok(Self(object.into_iter().filter_map(scalar_field).collect()))
    } else {
      let Form(fields) = Form::<FieldMap>::from_request(req, state)
        .await
        .map_err(|e| Error::BadRequest(e.body_text()))?;
      Ok(Self(fields))
    }
  }
}

/// Flatten a JSON member to a string. Nested values and nulls are dropped.
fn scalar_field((name, value): (String, Value)) -> Option<(String, String)> {
  let value = match value {
    Value::String(s) => s,
    Value::Number(n) => n.to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Null | Value::Array(_) | Value::Object(_) => return None,
  };
  Some((name, value))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scalar_members_become_strings() {
    assert_eq!(
      scalar_field(("code".into(), Value::from(42))),
      Some(("code".into(), "42".into()))
    );
    assert_eq!(
      scalar_field(("name".into(), Value::from("Ada"))),
      Some(("name".into(), "Ada".into()))
    );
    assert_eq!(scalar_field(("tags".into(), serde_json::json!(["a"]))), None);
    assert_eq!(scalar_field(("email".into(), Value::Null)), None);
  }
}
