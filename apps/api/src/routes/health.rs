use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and collaborator mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let mode = if state.config.uses_live_model() {
        "live"
    } else {
        "simulation"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "parcours-api",
        "collaborators": mode
    }))
}
