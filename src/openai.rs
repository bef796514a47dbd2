//! Minimal OpenAI-compatible client for step hints.
//!
//! We only call chat.completions and request plain text.
//! Calls are instrumented and log model names, latencies, and response sizes (not contents).
//!
//! NOTE: We never log the API key.

use std::time::{Duration, Instant};

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::Prompts;
use crate::session::HintRequest;
use crate::util::{fill_template, trunc_for_log};

#[derive(Debug, Error)]
pub enum HintError {
  #[error("hint request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("hint service HTTP {status}: {message}")]
  Status { status: reqwest::StatusCode, message: String },
  #[error("hint service returned no text")]
  Empty,
  #[error("hint service did not answer within {0:?}")]
  Timeout(Duration),
}

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub hint_model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok()?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let hint_model =
      std::env::var("OPENAI_HINT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());

    Self::new(api_key, base_url, hint_model).ok()
  }

  pub fn new(api_key: String, base_url: String, hint_model: String) -> Result<Self, HintError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()?;
    Ok(Self { client, api_key, base_url, hint_model })
  }

  /// Plain-text chat completion.
  #[instrument(level = "info", skip(self, system, user), fields(model = %model))]
  async fn chat_plain(
    &self,
    model: &str,
    system: &str,
    user: &str,
    temperature: f32,
  ) -> Result<String, HintError> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: model.to_string(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
      max_tokens: Some(120),
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "quadramaster-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let message = extract_openai_error(&body).unwrap_or_else(|| trunc_for_log(&body, 200));
      return Err(HintError::Status { status, message });
    }

    let body: ChatCompletionResponse = res.json().await?;
    if let Some(usage) = &body.usage {
      info!(prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    let text = body.choices.first()
      .and_then(|c| c.message.content.clone())
      .unwrap_or_default().trim().to_string();

    Ok(text)
  }

  /// One short hint for a rejected step. Empty output is an error so the
  /// caller can substitute its own text.
  #[instrument(
    level = "info",
    skip(self, prompts, request),
    fields(step = %request.step_name, lang = request.language.tag(), model = %self.hint_model)
  )]
  pub async fn step_hint(&self, prompts: &Prompts, request: &HintRequest) -> Result<String, HintError> {
    let user = fill_template(
      &prompts.hint_user_template,
      &[
        ("equation", request.equation.as_str()),
        ("step", request.step_name.as_str()),
        ("expected", request.expected.as_str()),
        ("submitted", request.submitted.as_str()),
        ("language", request.language.display_name()),
      ],
    );
    let start = Instant::now();
    let text = self.chat_plain(&self.hint_model, &prompts.hint_system, &user, 0.4).await?;
    info!(elapsed = ?start.elapsed(), hint_len = text.len(), "Hint received");
    if text.is_empty() {
      return Err(HintError::Empty);
    }
    Ok(text)
  }
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
  #[serde(skip_serializing_if = "Option::is_none")]
  max_tokens: Option<u32>,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  match serde_json::from_str::<EWrap>(body) {
    Ok(w) => Some(w.error.message),
    Err(_) => None,
  }
}
