//! Axum route handlers for the transparency API.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::models::form::FormData;
use crate::models::question::Question;
use crate::models::score::ScoreResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub count: usize,
}

fn require_fields(form: &FormData, fields: &[&str]) -> Result<(), AppError> {
    for field in fields {
        if form.get(field).is_none() {
            return Err(AppError::Validation(format!(
                "Missing required field: {field}"
            )));
        }
    }
    Ok(())
}

/// POST /generate-questions
///
/// Follow-up questions for a partially filled form. Requires `category` and
/// `productName` keys (present, possibly empty); never fails past
/// validation — the service always produces a list.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> Result<Json<GenerateQuestionsResponse>, AppError> {
    require_fields(&form, &["category", "productName"])?;

    let questions = state.service.generate_questions(&form).await;
    let count = questions.len();

    Ok(Json(GenerateQuestionsResponse {
        success: true,
        questions,
        count,
    }))
}

/// POST /transparency-score
///
/// Heuristic transparency score over the submitted fields.
pub async fn handle_transparency_score(
    State(state): State<AppState>,
    Json(form): Json<FormData>,
) -> Result<Json<ScoreResult>, AppError> {
    require_fields(&form, &["productName", "category"])?;

    Ok(Json(state.service.calculate_score(&form).await))
}

/// GET /questions/templates
///
/// The static category → questions table.
pub async fn handle_question_templates(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, Vec<Question>>> {
    Json(state.service.question_bank().templates().clone())
}

/// GET /ai/status
///
/// Reports whether a provider credential is configured. Requests always
/// succeed either way; this only tells callers which path they will get.
pub async fn handle_ai_status(State(state): State<AppState>) -> Json<Value> {
    let enabled = state.service.ai_enabled();
    Json(json!({
        "ai_enabled": enabled,
        "service_status": if enabled { "healthy" } else { "disabled" },
        "timestamp": Utc::now().timestamp(),
    }))
}
