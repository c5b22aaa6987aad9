// ABOUTME: Marks recipe ingredients on-sale by exact/keyword/substring match against a deal set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ingredient Matcher
//!
//! Idempotent, side-effect-free beyond the `on_sale` mutation
//! (spec.md §4.7).

mod ingredient_matcher;

pub use ingredient_matcher::mark_on_sale;
