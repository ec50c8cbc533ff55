use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports the service version and how tenants are resolved. Never calls upstream.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let tenant_source = match state.config.tenant_override {
        Some(_) => "fixed",
        None => "header",
    };
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "upstream_host": state.config.upstream_url.host_str(),
        "tenant_source": tenant_source,
    }))
}
