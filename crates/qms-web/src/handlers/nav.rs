//! Static navigation fragments.

use axum::response::Html;
use qms_core::registry;

use crate::fragment;

/// `GET /home`
pub async fn home() -> Html<String> { Html(fragment::render_home()) }

/// `GET /general-info`
pub async fn general_info() -> Html<String> {
  Html(fragment::render_general_info(registry::definitions()))
}
