//! Translator bridge: natural-language text in, SQL text out.
//!
//! Wraps an OpenAI-compatible chat-completions endpoint with the fixed
//! priming context from [`priming`]. The bridge performs no validation of
//! its output; whatever the model emits is returned verbatim. Callers own
//! the decision to execute it (see the chat handler).

pub mod priming;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config;
pub use priming::{Priming, PRIMING_V1};

#[derive(Debug, Error)]
pub enum TranslatorError {
    #[error("translator API key not configured")]
    MissingApiKey,

    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translator returned an empty response")]
    EmptyResponse,
}

// OpenAI-compatible request/response shapes
#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageContent,
}

#[derive(Deserialize)]
struct ChatMessageContent {
    content: String,
}

/// Client for the external translation service.
pub struct TranslatorBridge {
    api_key: Option<String>,
    api_base: String,
    model: String,
    priming: Priming,
    client: reqwest::Client,
}

impl TranslatorBridge {
    /// Build a bridge from the configured translator settings. A missing
    /// API key is only an error once a network translation is needed;
    /// priming-fixture inputs still resolve without one.
    pub fn from_config() -> Result<Self, TranslatorError> {
        let translator = &config::config().translator;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(translator.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: translator.api_key.clone(),
            api_base: translator.api_base.clone(),
            model: translator.model.clone(),
            priming: PRIMING_V1,
            client,
        })
    }

    /// Translate free text into a SQL string. Inputs matching a priming
    /// example short-circuit to the paired output; everything else goes
    /// to the external service with the priming context prepended.
    pub async fn translate(&self, text: &str) -> Result<String, TranslatorError> {
        if let Some(fixture) = self.priming.lookup(text) {
            return Ok(fixture.to_string());
        }

        let api_key = self.api_key.as_ref().ok_or(TranslatorError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.messages_for(text),
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatCompletionResponse>()
            .await?;

        let sql = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(TranslatorError::EmptyResponse)?;

        Ok(sql)
    }

    /// System instruction, then the ordered few-shot pairs, then the
    /// caller's question.
    fn messages_for(&self, text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.priming.examples.len() * 2 + 2);
        messages.push(ChatMessage {
            role: "system",
            content: self.priming.instruction.to_string(),
        });
        for (input, output) in self.priming.examples {
            messages.push(ChatMessage {
                role: "user",
                content: (*input).to_string(),
            });
            messages.push(ChatMessage {
                role: "assistant",
                content: (*output).to_string(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: text.to_string(),
        });
        messages
    }
}
