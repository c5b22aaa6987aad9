// ABOUTME: Domain-facing entry point for the kit's four-phase cooking pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Thin re-export over [`crate::llm::adapter::generate_phases`]: the
//! wire contract (exactly four phase keys, fresh step UUIDs, fallback
//! skeleton on failure) is owned by the LLM Client Adapter, which is
//! the single place that talks to the model (spec.md §4.4, §4.9).

pub use crate::llm::adapter::generate_phases as synthesize_phases;
