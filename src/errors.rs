// ABOUTME: Centralized error handling for the meal-prep orchestration engine
// ABOUTME: Defines AppError and the error-code taxonomy shared across components
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! A single [`AppError`] enum covers every failure mode the core can
//! surface. Transport and parse failures against the LLM are retried
//! internally by the components that own them (see
//! [`crate::llm::adapter`]) and only escape as `AppError` once the
//! retry budget is exhausted; callers never need to distinguish a
//! transient network blip from a permanent one.

use thiserror::Error;

/// Standard error codes, mirroring the HTTP status a transport layer
/// would map each kind to (the core itself never depends on an HTTP
/// framework; see spec.md §1 Out-of-scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed request body, unknown weekday/meal type (→ 400).
    InvalidInput,
    /// Missing premium subscription for `/chat` (→ 403).
    AuthRequired,
    /// Hard constraint violation surfaced to the caller (→ 500).
    ConstraintViolation,
    /// Misconfigured or missing environment configuration.
    ConfigError,
    /// LLM or Deal Source unreachable, after retries exhausted.
    ExternalServiceError,
    /// Internal invariant violation.
    InternalError,
}

impl ErrorCode {
    /// The HTTP status code a transport layer would map this to.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::AuthRequired => 403,
            Self::ConstraintViolation | Self::InternalError => 500,
            Self::ConfigError => 500,
            Self::ExternalServiceError => 502,
        }
    }
}

/// Unified error type for the meal-prep orchestration core.
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM or Deal Source transport failure (network, timeout, non-2xx).
    #[error("transport error: {0}")]
    Transport(String),

    /// The LLM response could not be parsed as the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A hard constraint was violated and could not be repaired
    /// (e.g. a required field missing after defaults were applied).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Malformed request input: unknown weekday, unknown meal type, etc.
    #[error("invalid input: {field}: {message}")]
    Input {
        /// Name of the offending field.
        field: String,
        /// Human-readable description of the problem.
        message: String,
    },

    /// Caller lacks the required premium entitlement.
    #[error("authentication required: {0}")]
    Auth(String),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// An internal invariant was violated.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The [`ErrorCode`] this error maps to.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport(_) => ErrorCode::ExternalServiceError,
            Self::Parse(_) => ErrorCode::ExternalServiceError,
            Self::Constraint(_) => ErrorCode::ConstraintViolation,
            Self::Input { .. } => ErrorCode::InvalidInput,
            Self::Auth(_) => ErrorCode::AuthRequired,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Construct a [`AppError::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Construct a [`AppError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Construct a [`AppError::Input`].
    pub fn input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Input {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A single localized "failed to generate" message for user-visible
    /// fatal paths (spec.md §7): no stack traces, no partial JSON.
    #[must_use]
    pub fn user_message(&self, language: crate::models::Language) -> &'static str {
        match language {
            crate::models::Language::Fr => "Échec de la génération. Veuillez réessayer.",
            crate::models::Language::En => "Failed to generate. Please try again.",
        }
    }
}

/// Convenience alias used throughout the crate.
pub type AppResult<T> = Result<T, AppError>;
