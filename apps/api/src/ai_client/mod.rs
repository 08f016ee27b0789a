//! Provider Client — the single point of entry for all text-generation API
//! calls in the service.
//!
//! Providers are tried in a fixed priority order (Perplexity, then Claude,
//! then Grok); exactly one request is made per call, with no retry. Every
//! failure surfaces as an [`AiError`] and is absorbed by the transparency
//! service, which switches to the local fallback path.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::models::form::FormData;

pub mod parser;
pub mod prompts;

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const GROK_API_URL: &str = "https://api.x.ai/v1/chat/completions";
const ANTHROPIC_VERSION: &str = "2023-06-01";

const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-small-128k-online";
const CLAUDE_MODEL: &str = "claude-3-haiku-20240307";
const GROK_MODEL: &str = "grok-beta";

/// Transport timeout applied to every provider call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("no provider credential configured")]
    Unavailable,

    #[error("provider request timed out")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unparseable provider response: {0}")]
    Unparseable(String),
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AiError::Timeout
        } else {
            AiError::Http(e)
        }
    }
}

/// The two prompt families the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Questions,
    Score,
}

impl PromptKind {
    fn label(self) -> &'static str {
        match self {
            PromptKind::Questions => "question generation",
            PromptKind::Score => "scoring",
        }
    }

    fn system(self) -> &'static str {
        match self {
            PromptKind::Questions => prompts::QUESTION_SYSTEM,
            PromptKind::Score => prompts::SCORING_SYSTEM,
        }
    }

    fn max_tokens(self) -> u32 {
        match self {
            PromptKind::Questions => 1000,
            PromptKind::Score => 800,
        }
    }

    fn temperature(self) -> f64 {
        match self {
            PromptKind::Questions => 0.7,
            PromptKind::Score => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Perplexity,
    Claude,
    Grok,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::Perplexity => "Perplexity",
            Provider::Claude => "Claude",
            Provider::Grok => "Grok",
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI-style chat completion request, shared by Perplexity and Grok.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    /// Perplexity carries the credential inside the payload, not a bearer
    /// header.
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

/// HTTP client over the configured text-generation providers.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    perplexity_api_key: Option<String>,
    claude_api_key: Option<String>,
    grok_api_key: Option<String>,
}

impl AiClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            perplexity_api_key: config.perplexity_api_key.clone(),
            claude_api_key: config.claude_api_key.clone(),
            grok_api_key: config.grok_api_key.clone(),
        }
    }

    /// True when at least one provider credential is configured.
    pub fn enabled(&self) -> bool {
        self.active_provider().is_some()
    }

    /// The provider a call would use right now, if any.
    pub fn active_provider(&self) -> Option<Provider> {
        self.select_provider().ok().map(|(provider, _)| provider)
    }

    fn select_provider(&self) -> Result<(Provider, &str), AiError> {
        if let Some(key) = self.perplexity_api_key.as_deref() {
            return Ok((Provider::Perplexity, key));
        }
        if let Some(key) = self.claude_api_key.as_deref() {
            return Ok((Provider::Claude, key));
        }
        if let Some(key) = self.grok_api_key.as_deref() {
            return Ok((Provider::Grok, key));
        }
        Err(AiError::Unavailable)
    }

    /// Builds the prompt for `kind`, sends a single request to the first
    /// configured provider, and returns the raw text of the completion.
    ///
    /// Logs the full prompt and response body at `debug` — submitted form
    /// content ends up in the logs, which is deliberate for this internal
    /// tool but worth knowing before pointing real traffic at it.
    pub async fn generate(&self, kind: PromptKind, form: &FormData) -> Result<String, AiError> {
        let (provider, api_key) = self.select_provider()?;
        let prompt = match kind {
            PromptKind::Questions => prompts::build_question_prompt(form),
            PromptKind::Score => prompts::build_scoring_prompt(form),
        };

        info!("Sending {} request to {} API", kind.label(), provider.name());
        debug!("Generated prompt: {prompt}");

        let request = match provider {
            Provider::Perplexity => {
                self.client
                    .post(PERPLEXITY_API_URL)
                    .json(&ChatRequest {
                        model: PERPLEXITY_MODEL,
                        messages: vec![
                            ChatMessage {
                                role: "system",
                                content: kind.system(),
                            },
                            ChatMessage {
                                role: "user",
                                content: &prompt,
                            },
                        ],
                        max_tokens: kind.max_tokens(),
                        temperature: kind.temperature(),
                        api_key: Some(api_key),
                    })
            }
            Provider::Claude => self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&AnthropicRequest {
                    model: CLAUDE_MODEL,
                    max_tokens: kind.max_tokens(),
                    messages: vec![ChatMessage {
                        role: "user",
                        content: &prompt,
                    }],
                }),
            Provider::Grok => self.client.post(GROK_API_URL).bearer_auth(api_key).json(
                &ChatRequest {
                    model: GROK_MODEL,
                    messages: vec![
                        ChatMessage {
                            role: "system",
                            content: kind.system(),
                        },
                        ChatMessage {
                            role: "user",
                            content: &prompt,
                        },
                    ],
                    max_tokens: kind.max_tokens(),
                    temperature: kind.temperature(),
                    api_key: None,
                },
            ),
        };

        let response = request.send().await?;
        let status = response.status();
        info!("{} API response status: {status}", provider.name());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} API error {status}: {body}", provider.name());
            return Err(AiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!("{} API response body: {body}", provider.name());

        extract_text(provider, &body)
    }
}

/// Pulls the completion text out of a provider response body.
fn extract_text(provider: Provider, body: &str) -> Result<String, AiError> {
    let text = match provider {
        Provider::Perplexity | Provider::Grok => {
            let parsed: ChatResponse =
                serde_json::from_str(body).map_err(|e| AiError::Unparseable(e.to_string()))?;
            parsed.choices.into_iter().next().map(|c| c.message.content)
        }
        Provider::Claude => {
            let parsed: AnthropicResponse =
                serde_json::from_str(body).map_err(|e| AiError::Unparseable(e.to_string()))?;
            parsed.content.into_iter().find_map(|b| b.text)
        }
    };

    text.ok_or_else(|| {
        AiError::Unparseable(format!(
            "{} response carried no text content",
            provider.name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(
        perplexity: Option<&str>,
        claude: Option<&str>,
        grok: Option<&str>,
    ) -> Config {
        Config {
            perplexity_api_key: perplexity.map(str::to_string),
            claude_api_key: claude.map(str::to_string),
            grok_api_key: grok.map(str::to_string),
            port: 5000,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_provider_priority_perplexity_first() {
        let client = AiClient::from_config(&config_with_keys(Some("p"), Some("c"), Some("g")));
        assert_eq!(client.active_provider(), Some(Provider::Perplexity));
    }

    #[test]
    fn test_provider_priority_claude_before_grok() {
        let client = AiClient::from_config(&config_with_keys(None, Some("c"), Some("g")));
        assert_eq!(client.active_provider(), Some(Provider::Claude));

        let client = AiClient::from_config(&config_with_keys(None, None, Some("g")));
        assert_eq!(client.active_provider(), Some(Provider::Grok));
    }

    #[test]
    fn test_no_keys_means_disabled() {
        let client = AiClient::from_config(&config_with_keys(None, None, None));
        assert!(!client.enabled());
        assert!(matches!(
            client.select_provider(),
            Err(AiError::Unavailable)
        ));
    }

    #[test]
    fn test_extract_text_chat_shape() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "hello"}}]}"#;
        assert_eq!(
            extract_text(Provider::Perplexity, body).unwrap(),
            "hello"
        );
        assert_eq!(extract_text(Provider::Grok, body).unwrap(), "hello");
    }

    #[test]
    fn test_extract_text_anthropic_shape() {
        let body = r#"{"content": [{"type": "text", "text": "hi there"}]}"#;
        assert_eq!(extract_text(Provider::Claude, body).unwrap(), "hi there");
    }

    #[test]
    fn test_extract_text_empty_choices_is_unparseable() {
        let body = r#"{"choices": []}"#;
        assert!(matches!(
            extract_text(Provider::Perplexity, body),
            Err(AiError::Unparseable(_))
        ));
    }

    #[test]
    fn test_perplexity_request_carries_inline_api_key() {
        let request = ChatRequest {
            model: PERPLEXITY_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            max_tokens: 1000,
            temperature: 0.7,
            api_key: Some("secret"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["api_key"], "secret");
    }

    #[test]
    fn test_grok_request_omits_api_key_field() {
        let request = ChatRequest {
            model: GROK_MODEL,
            messages: vec![],
            max_tokens: 800,
            temperature: 0.3,
            api_key: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("api_key").is_none());
    }
}
