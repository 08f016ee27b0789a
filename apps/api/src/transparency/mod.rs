//! Transparency Service — orchestrates provider calls with local fallback.
//!
//! Both operations are total: provider and parse failures are logged and
//! absorbed here, never propagated to the HTTP boundary.

pub mod handlers;
pub mod scoring;
pub mod templates;

use tracing::{info, warn};

use crate::ai_client::{parser, AiClient, AiError, PromptKind};
use crate::models::form::FormData;
use crate::models::question::Question;
use crate::models::score::ScoreResult;
use crate::transparency::templates::QuestionBank;

pub struct TransparencyService {
    ai: AiClient,
    bank: QuestionBank,
}

impl TransparencyService {
    pub fn new(ai: AiClient) -> Self {
        Self {
            ai,
            bank: QuestionBank::new(),
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.enabled()
    }

    pub fn question_bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Follow-up questions for a submitted form. Provider-backed when a
    /// credential is configured; any failure, or a provider answer with no
    /// usable questions, falls through to the template bank.
    pub async fn generate_questions(&self, form: &FormData) -> Vec<Question> {
        info!(
            "Generating questions for category: {}",
            form.get("category").unwrap_or("Unknown")
        );

        if self.ai.enabled() {
            match self.provider_questions(form).await {
                Ok(questions) if !questions.is_empty() => {
                    info!("Provider generated {} questions", questions.len());
                    return questions;
                }
                Ok(_) => {
                    warn!("Provider returned no usable questions, falling back to templates")
                }
                Err(e) => warn!("Provider question generation failed, falling back to templates: {e}"),
            }
        }

        info!("Using question templates");
        self.bank.questions_for(form)
    }

    /// Transparency score for a submitted form. A failed provider pipeline
    /// degrades to the standalone local formula; with no provider
    /// configured the service-level formula applies directly.
    pub async fn calculate_score(&self, form: &FormData) -> ScoreResult {
        info!("Calculating transparency score");

        if self.ai.enabled() {
            return match self.provider_score(form).await {
                Ok(result) => {
                    info!("Provider calculated score: {}", result.score);
                    result
                }
                Err(e) => {
                    warn!("Provider scoring failed, using local formula: {e}");
                    scoring::fallback_score(form)
                }
            };
        }

        info!("Using local scoring formula");
        scoring::service_score(form)
    }

    async fn provider_questions(&self, form: &FormData) -> Result<Vec<Question>, AiError> {
        let text = self.ai.generate(PromptKind::Questions, form).await?;
        parser::parse_questions(&text)
    }

    async fn provider_score(&self, form: &FormData) -> Result<ScoreResult, AiError> {
        let text = self.ai.generate(PromptKind::Score, form).await?;
        parser::parse_score(&text)
    }
}
