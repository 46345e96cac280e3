pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Ranking API
        .route("/api/v1/rank", post(handlers::handle_rank))
        .route("/api/v1/score", post(handlers::handle_score))
        .route("/api/v1/keywords", post(handlers::handle_keywords))
        .with_state(state)
}
