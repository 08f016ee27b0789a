use serde::{Deserialize, Serialize};

/// Input control rendered for a questionnaire item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    #[default]
    Textarea,
    Select,
    Number,
}

impl QuestionType {
    /// Provider output is free text; anything unrecognized degrades to
    /// `textarea`, the default control.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "text" => QuestionType::Text,
            "select" => QuestionType::Select,
            "number" => QuestionType::Number,
            _ => QuestionType::Textarea,
        }
    }
}

/// A single follow-up questionnaire item. Constructed fresh per request,
/// either from the static template bank or parsed from provider output;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub required: bool,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn textarea(id: &str, question: &str, required: bool, category: &str) -> Self {
        Self {
            id: id.to_string(),
            question: question.to_string(),
            question_type: QuestionType::Textarea,
            required,
            category: category.to_string(),
            options: Vec::new(),
        }
    }

    pub fn select(
        id: &str,
        question: &str,
        required: bool,
        category: &str,
        options: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            question: question.to_string(),
            question_type: QuestionType::Select,
            required,
            category: category.to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
        }
    }
}
