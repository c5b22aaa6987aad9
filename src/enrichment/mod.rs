// ABOUTME: Attaches shelf-life/freezability/storage-note metadata to generated recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Enricher
//!
//! Deterministic title-keyword classifier (spec.md §4.6).

mod recipe_enricher;

pub use recipe_enricher::enrich_recipe;
