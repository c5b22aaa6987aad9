// ABOUTME: Cross-recipe prep batching and the kit's four-phase cooking pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prep Grouper and Phase Synthesizer
//!
//! Two stages that turn a kit's independently generated recipes into
//! a single coherent batch-cook session (spec.md §4.8, §4.9).

mod grouper;
mod phase_synthesizer;

pub use grouper::group_preparation_steps;
pub use phase_synthesizer::synthesize_phases;
