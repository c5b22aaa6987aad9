// ABOUTME: LLM client abstraction: the contract the orchestration engine depends on
// ABOUTME: Defines ChatMessage/ChatRequest/ChatResponse and the LlmClient trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Client
//!
//! The orchestration engine never talks to a concrete LLM vendor API
//! directly; every component depends on the [`LlmClient`] trait (spec.md
//! §6 "Internal interfaces the core consumes": `LLMClient.ChatCompletion`).
//! [`HttpLlmClient`] is the production implementation, speaking the
//! OpenAI-compatible chat-completions wire format. Tests substitute a
//! scripted double (see `tests/` and [`adapter`]'s unit tests).

pub mod adapter;
mod http_client;
pub mod json_extract;
pub mod prompts;

pub use http_client::HttpLlmClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Role of a message in a chat-completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction.
    System,
    /// User input.
    User,
}

/// A single message in a chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender role.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Construct a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Construct a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A chat-completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Ordered messages, system first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Max tokens to generate.
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Construct a request from a system and user prompt with sane
    /// defaults for recipe/phase generation (low temperature favors
    /// structurally valid JSON over creative variance).
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// A chat-completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Raw text content returned by the model.
    pub content: String,
}

/// The contract every LLM backend must implement.
///
/// # Errors
///
/// Implementations return [`AppError::Transport`] for network/timeout
/// failures; callers (the retry loop in [`adapter`]) are responsible
/// for retry policy, not this trait.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Perform a single chat completion.
    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}
