//! # Chat completion client
//!
//! Builds the conversation payload for one markdown file and sends it to the
//! GitHub Models chat-completion endpoint.
//!
//! - [`ChatRequest`] is built from the [`ProcessorConfig`] plus the file content.
//! - The [`Completer`] trait is the seam between orchestration and transport;
//!   it is annotated for `mockall` so tests can stub the endpoint.
//! - [`ChatClient`] is the reqwest-backed implementation. Construct it with
//!   [`ChatClient::new_from_env`], which requires `GITHUB_TOKEN`.
//!
//! Every failure is logged here with whatever body the endpoint returned and
//! then propagated; nothing is retried.

use crate::config::ProcessorConfig;
use crate::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

pub const DEFAULT_ENDPOINT: &str = "https://models.github.ai/inference/chat/completions";
pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body sent to the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatRequest {
    /// Composes the system/user conversation for one document.
    ///
    /// A non-empty `title` is prepended to the user message as
    /// `Title: <title>\n\nContent:\n`.
    pub fn new(config: &ProcessorConfig, content: &str, title: Option<&str>) -> Self {
        let user_content = match title {
            Some(title) if !title.is_empty() => format!("Title: {title}\n\nContent:\n{content}"),
            _ => content.to_string(),
        };
        Self {
            model: config.model.clone(),
            messages: vec![
                ChatMessage::system(config.system_prompt.clone()),
                ChatMessage::user(user_content),
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Pulls `choices[0].message.content` out of a raw response body.
pub fn extract_content(body: &str) -> Result<String, ChatError> {
    let malformed = |reason: String| {
        error!(reason = %reason, response = %body, "[CHAT] Failed to parse API response");
        ChatError::MalformedResponse {
            reason,
            body: body.to_string(),
        }
    };

    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| malformed("response contained no choices".to_string()))?;
    choice
        .message
        .content
        .ok_or_else(|| malformed("first choice has no message content".to_string()))
}

/// Anything that can turn a [`ChatRequest`] into generated text.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ChatError>;
}

pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ChatClient {
    /// Builds a client with the fixed endpoint and a 30 second timeout.
    pub fn new(token: impl Into<String>) -> Result<Self, ChatError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ChatError::MissingCredential);
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ChatError::Client)?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token,
        })
    }

    pub fn new_from_env() -> Result<Self, ChatError> {
        match std::env::var(TOKEN_VAR) {
            Ok(token) if !token.is_empty() => {
                info!(
                    endpoint = DEFAULT_ENDPOINT,
                    "[CHAT] Initialised ChatClient from environment"
                );
                Self::new(token)
            }
            _ => {
                error!("[CHAT] GITHUB_TOKEN missing in environment");
                Err(ChatError::MissingCredential)
            }
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Completer for ChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ChatError> {
        debug!(
            model = %request.model,
            endpoint = %self.endpoint,
            "[CHAT] Sending chat completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, endpoint = %self.endpoint, "[CHAT] API request failed");
                ChatError::Request(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = ?e, status = %status, "[CHAT] Failed to read response body");
            ChatError::Request(e)
        })?;

        if !status.is_success() {
            error!(status = %status, response = %body, "[CHAT] API returned error status");
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }
}
