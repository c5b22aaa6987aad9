// ABOUTME: Conversational intent classification and reply composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intent Router and Chat Orchestrator
//!
//! The router (spec.md §4.10) is a pure, stateless classifier; the
//! orchestrator (spec.md §2 "Chat Orchestrator") drives the LLM calls
//! and composes the reply the transport layer forwards to the client.

mod intent_router;
mod orchestrator;

pub use intent_router::{classify_intent, detect_mode, strip_add_meal_tokens, ChatMode, RouterIntent};
pub use orchestrator::{handle_turn, AddMealMetadata, ChatReply};
