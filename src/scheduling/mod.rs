// ABOUTME: Per-slot scheduling metadata: weekday, complexity band, time cap, shelf-life floor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Slot Scheduler
//!
//! Derives the metadata every downstream component (Prompt Assembler,
//! LLM Client Adapter, Recipe Enricher) needs for a given [`Slot`],
//! deterministically from weekday and [`Preferences`] (spec.md §4.1).

mod slot_scheduler;

pub use slot_scheduler::{schedule_kit_slots, schedule_plan_slots, ScheduledSlot};
