// ABOUTME: OpenAI-compatible chat-completions client (Ollama, vLLM, LocalAI, or any compatible API)
// ABOUTME: Production implementation of the LlmClient trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # HTTP LLM Client
//!
//! Speaks the `OpenAI`-compatible chat-completions wire format over
//! `reqwest`. Any backend that implements that format (Ollama, vLLM,
//! `LocalAI`, or a cloud gateway) works without code changes — only
//! [`crate::config::Settings`] needs to point at it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmClient, MessageRole};
use crate::errors::AppError;

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: match msg.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
            },
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
}

/// A chat-completions client speaking the `OpenAI`-compatible wire format.
pub struct HttpLlmClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpLlmClient {
    /// Construct a client from already-resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the underlying HTTP client
    /// cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        call_timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(call_timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
        })
    }

    /// Construct a client from process-scoped [`crate::config::Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the underlying HTTP client
    /// cannot be built.
    pub fn from_settings(settings: &crate::config::Settings) -> Result<Self, AppError> {
        Self::new(
            settings.llm_base_url.clone(),
            settings.llm_api_key.clone(),
            settings.llm_model.clone(),
            settings.llm_call_timeout,
        )
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let wire = WireRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut req = self.http.post(&url).json(&wire);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        debug!(model = %self.model, "dispatching chat completion");

        let response = req
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("LLM request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "LLM returned non-success status");
            return Err(AppError::Transport(format!(
                "LLM returned HTTP {status}: {body}"
            )));
        }

        let parsed: WireResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("failed to decode LLM response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::Parse("LLM response had no message content".to_owned()))?;

        Ok(ChatResponse { content })
    }
}
