// ABOUTME: Bounded-concurrency fan-out over GenerateRecipeWithRetry, order-preserving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Parallel Generator
//!
//! Fans out one [`crate::llm::adapter::generate_recipe_with_retry`]
//! call per slot under a bounded concurrency cap, cooperatively
//! cancellable, output ordered by input position (spec.md §4.5).

mod parallel_generator;

pub use parallel_generator::{generate_plan, SlotGenerationRequest};
