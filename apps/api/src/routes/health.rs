use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version plus the active scoring setup.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "candidate-ranker",
        "description_backend": state.description_backend(),
        "semantic_blend": state.config.ranker.semantic_blend,
        "weights": state.ranker.weights()
    }))
}
