use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports whether real gateway credentials are configured. Used by load
/// balancers and monitoring systems.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let gateway = if state.config.gateway.is_placeholder() {
        "placeholder"
    } else {
        "configured"
    };

    Json(json!({
        "status": "healthy",
        "gateway": gateway,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
