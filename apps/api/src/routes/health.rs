use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and orchestration mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let orchestrator = if state.config.orchestrator_url.is_some() {
        "remote"
    } else {
        "offline"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "panelforge-api",
        "orchestrator": orchestrator
    }))
}
