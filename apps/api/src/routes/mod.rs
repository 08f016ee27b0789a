pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::transparency::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/generate-questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/transparency-score",
            post(handlers::handle_transparency_score),
        )
        .route(
            "/questions/templates",
            get(handlers::handle_question_templates),
        )
        .route("/ai/status", get(handlers::handle_ai_status))
        .with_state(state)
}
