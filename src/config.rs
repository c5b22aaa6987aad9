// ABOUTME: Process-scoped configuration loaded from environment variables
// ABOUTME: LLM provider selection, timeouts, and retry budget
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Configuration
//!
//! Mirrors the teacher's `config::environment` pattern: a single
//! struct loaded once at process start from environment variables,
//! with documented defaults. This is distinct from [`crate::models::Preferences`]
//! and [`crate::models::Constraints`], which are per-request data, not
//! process configuration (spec.md §9).

use std::env;
use std::time::Duration;

/// Environment variable naming the LLM base URL.
pub const LLM_BASE_URL_ENV: &str = "MEALPREP_LLM_BASE_URL";
/// Environment variable naming the LLM API key.
pub const LLM_API_KEY_ENV: &str = "MEALPREP_LLM_API_KEY";
/// Environment variable naming the LLM model.
pub const LLM_MODEL_ENV: &str = "MEALPREP_LLM_MODEL";

/// Process-scoped settings for the orchestration engine.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the OpenAI-compatible chat-completions endpoint.
    pub llm_base_url: String,
    /// API key, if the endpoint requires one.
    pub llm_api_key: Option<String>,
    /// Default model name.
    pub llm_model: String,
    /// Per-LLM-call deadline (spec.md §5, suggested 30s).
    pub llm_call_timeout: Duration,
    /// Deadline for a `/plan` request (spec.md §5, suggested 90s).
    pub plan_request_timeout: Duration,
    /// Deadline for a `/meal-prep-kit` request (spec.md §5, suggested 180s).
    pub kit_request_timeout: Duration,
    /// Max attempts for `GenerateRecipeWithRetry` (spec.md §4.4: 3).
    pub max_retry_attempts: u32,
    /// Max concurrent in-flight slot-generation tasks (spec.md §4.5).
    pub max_concurrent_generations: usize,
}

impl Settings {
    /// Load settings from the environment, falling back to documented
    /// defaults for everything except the API key.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            llm_base_url: env::var(LLM_BASE_URL_ENV)
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_owned()),
            llm_api_key: env::var(LLM_API_KEY_ENV).ok(),
            llm_model: env::var(LLM_MODEL_ENV).unwrap_or_else(|_| "qwen2.5:14b-instruct".to_owned()),
            llm_call_timeout: Duration::from_secs(30),
            plan_request_timeout: Duration::from_secs(90),
            kit_request_timeout: Duration::from_secs(180),
            max_retry_attempts: 3,
            max_concurrent_generations: 8,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane_without_env() {
        let settings = Settings {
            llm_base_url: "http://localhost:11434/v1".to_owned(),
            llm_api_key: None,
            llm_model: "qwen2.5:14b-instruct".to_owned(),
            llm_call_timeout: Duration::from_secs(30),
            plan_request_timeout: Duration::from_secs(90),
            kit_request_timeout: Duration::from_secs(180),
            max_retry_attempts: 3,
            max_concurrent_generations: 8,
        };
        assert_eq!(settings.max_retry_attempts, 3);
        assert_eq!(settings.plan_request_timeout, Duration::from_secs(90));
    }
}
