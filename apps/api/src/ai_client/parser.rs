//! Best-effort extraction of structured JSON from free-text provider output.
//!
//! The span heuristic takes everything from the first `{` to the last `}`
//! in the text. It is not a real JSON scanner: prose containing a stray
//! closing brace after the object will corrupt the span. Accepted
//! limitation — providers are instructed to return bare JSON, and any
//! extraction failure just routes the request onto the fallback path.

use chrono::Utc;
use serde_json::{Map, Value};

use super::AiError;
use crate::models::question::{Question, QuestionType};
use crate::models::score::ScoreResult;

/// The substring between the first `{` and the last `}`, inclusive.
fn json_span(text: &str) -> Result<&str, AiError> {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => Ok(&text[start..=end]),
        _ => Err(AiError::Unparseable(
            "no JSON object found in response".to_string(),
        )),
    }
}

fn parse_span(text: &str) -> Result<Value, AiError> {
    serde_json::from_str(json_span(text)?).map_err(|e| AiError::Unparseable(e.to_string()))
}

/// Parses provider output into a list of questions.
///
/// Accepts a bare array, an object wrapping a `questions` array, or a single
/// question object. Elements that are not objects with a `question` key are
/// dropped silently; missing attributes are defaulted.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, AiError> {
    let candidates = match parse_span(text)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("questions") {
            Some(Value::Array(items)) => items,
            _ => vec![Value::Object(map)],
        },
        other => vec![other],
    };

    let mut questions = Vec::new();
    for candidate in candidates {
        let Value::Object(map) = candidate else {
            continue;
        };
        if !map.contains_key("question") {
            continue;
        }
        let id = string_field(&map, "id").unwrap_or_else(|| format!("q_{}", questions.len()));
        questions.push(Question {
            id,
            question: string_field(&map, "question").unwrap_or_default(),
            question_type: map
                .get("type")
                .and_then(Value::as_str)
                .map(QuestionType::from_raw)
                .unwrap_or_default(),
            required: map.get("required").and_then(Value::as_bool).unwrap_or(false),
            category: string_field(&map, "category").unwrap_or_else(|| "general".to_string()),
            options: map
                .get("options")
                .and_then(Value::as_array)
                .map(|opts| {
                    opts.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        });
    }
    Ok(questions)
}

/// Parses provider output into a score record. Missing numeric fields
/// default (`max_score` to 100, the rest to 0); the provider's own
/// timestamp, if any, is ignored in favor of a fresh one.
pub fn parse_score(text: &str) -> Result<ScoreResult, AiError> {
    let Value::Object(map) = parse_span(text)? else {
        return Err(AiError::Unparseable(
            "scoring response is not a JSON object".to_string(),
        ));
    };

    Ok(ScoreResult {
        score: u32_field(&map, "score", 0),
        max_score: u32_field(&map, "max_score", 100),
        raw_score: u32_field(&map, "raw_score", 0),
        insights: string_list(&map, "insights"),
        recommendations: string_list(&map, "recommendations"),
        timestamp: Utc::now().timestamp(),
    })
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u32_field(map: &Map<String, Value>, key: &str, default: u32) -> u32 {
    map.get(key)
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or(default)
}

fn string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
