// ABOUTME: Pure composition of the per-recipe LLM user prompt from layered preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompt Assembler
//!
//! Builds the single user message sent to the recipe-generation LLM
//! call, as a fixed-order concatenation of sections (spec.md §4.2).
//! Pure over its inputs: identical [`PromptInputs`] always produce an
//! identical string.

mod assembler;

pub use assembler::{assemble_recipe_prompt, PromptInputs};
