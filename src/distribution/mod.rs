// ABOUTME: Allocates proteins across plan slots / kit recipes under diversity rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Protein Distributor
//!
//! Two modes (spec.md §4.3): plan mode, one protein suggestion per
//! slot including breakfast; kit mode, lunch/dinner only with a
//! stricter uniqueness/repetition contract.

mod protein;

pub use protein::{distribute_for_kit, distribute_for_plan};
