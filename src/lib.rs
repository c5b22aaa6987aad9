// ABOUTME: Main library entry point for the meal-prep orchestration engine
// ABOUTME: Library core only; no HTTP/transport layer (spec.md §1 Non-goals)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Meal-Prep Orchestration Engine
//!
//! A library core that turns a household's constraints and
//! preferences into a week's worth of recipes, or a batch-cookable
//! meal-prep kit, by orchestrating calls to an LLM through a small
//! pipeline of deterministic components.
//!
//! ## Architecture
//!
//! - **Slot Scheduler**: derives per-slot complexity band, time cap,
//!   and (for kits) shelf-life floor.
//! - **Protein Distributor**: spreads protein suggestions across a
//!   plan or kit under a diversity rule.
//! - **Deal Source**: normalizes weekly flyer items into a bilingual
//!   set the Ingredient Matcher consumes.
//! - **Prompt Assembler**: composes the fixed-order LLM user prompt.
//! - **LLM Client Adapter**: retry/clamp/fallback policy over a raw
//!   [`llm::LlmClient`].
//! - **Parallel Generator**: bounded-concurrency, cancellable fan-out
//!   across slots.
//! - **Recipe Enricher** / **Ingredient Matcher**: post-process each
//!   generated recipe with storage metadata and on-sale flags.
//! - **Prep Grouper** / **Phase Synthesizer**: batch a kit's recipes
//!   into cross-recipe prep steps and a four-phase cooking plan.
//! - **Intent Router** / **Chat Orchestrator**: classify and reply to
//!   conversational turns about an existing plan.
//! - **Concept Generator**: proposes themed kit concepts.
//!
//! [`engine`] wires all of the above into the `/plan` and
//! `/meal-prep-kit` dataflows described in spec.md §2.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mealprep_core::config::Settings;
//! use mealprep_core::engine::{plan, PlanRequest};
//! use mealprep_core::llm::HttpLlmClient;
//! use mealprep_core::models::{Constraints, Language, MealType, Preferences, Slot, UnitSystem, Weekday};
//!
//! # async fn run() -> mealprep_core::errors::AppResult<()> {
//! let settings = Settings::from_env();
//! let client: Arc<dyn mealprep_core::llm::LlmClient> = Arc::new(HttpLlmClient::from_settings(&settings)?);
//!
//! let request = PlanRequest {
//!     week_start: chrono::Utc::now().date_naive(),
//!     units: UnitSystem::Metric,
//!     slots: vec![Slot::new(Weekday::Mon, MealType::Dinner)],
//!     constraints: Constraints::default(),
//!     preferences: Preferences::default(),
//!     language: Language::En,
//! };
//! let response = plan::<mealprep_core::deals::FallbackDealSource>(client, None, request, settings.max_concurrent_generations).await;
//! println!("generated {} meals", response.items.len());
//! # Ok(())
//! # }
//! ```

/// Conversational intent classification and reply composition.
pub mod chat;

/// Proposes themed meal-prep-kit concepts via a dedicated LLM call.
pub mod concept;

/// Process-scoped configuration loaded from environment variables.
pub mod config;

/// Normalized weekly deal lookup, bilingual synonym expansion, and caching.
pub mod deals;

/// Allocates proteins across plan slots / kit recipes under diversity rules.
pub mod distribution;

/// Attaches shelf-life/freezability/storage-note metadata to generated recipes.
pub mod enrichment;

/// Orchestration facade wiring components into the `/plan` and `/meal-prep-kit` dataflows.
pub mod engine;

/// Unified error handling for the orchestration engine.
pub mod errors;

/// Bounded-concurrency fan-out over recipe generation.
pub mod generation;

/// LLM client abstraction and the retry/clamp/fallback adapter built on top of it.
pub mod llm;

/// Marks recipe ingredients on-sale against a normalized deal set.
pub mod matching;

/// Core data model: `Ingredient`, `Recipe`, `Slot`, `Preferences`, `Constraints`, `MealPrepKit`.
pub mod models;

/// Cross-recipe prep batching and the kit's four-phase cooking pipeline.
pub mod prep;

/// Pure composition of the per-recipe LLM user prompt from layered preferences.
pub mod prompt;

/// Derives per-slot weekend/time-cap/complexity/shelf-life scheduling metadata.
pub mod scheduling;
