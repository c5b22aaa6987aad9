// ABOUTME: Derives per-slot weekend/time-cap/complexity/shelf-life metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{ComplexityBand, Preferences, Slot, Weekday};

/// Scheduling metadata for a single slot (spec.md §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledSlot {
    /// The original slot.
    pub slot: Slot,
    /// `true` for Saturday/Sunday.
    pub is_weekend: bool,
    /// Max minutes the generated recipe may take.
    pub time_cap: u32,
    /// Derived complexity band.
    pub complexity_band: ComplexityBand,
    /// Position of this slot's weekday in the kit's day list, if scheduling a kit.
    pub target_day_index: Option<usize>,
    /// `target_day_index + 1`, if scheduling a kit.
    pub min_shelf_life_required: Option<u8>,
}

fn complexity_band(is_weekend: bool, time_cap: u32, slot_index: usize) -> ComplexityBand {
    if is_weekend && time_cap >= 60 && slot_index % 2 == 0 {
        ComplexityBand::Complex
    } else if is_weekend || time_cap > 30 {
        ComplexityBand::Medium
    } else {
        ComplexityBand::Simple
    }
}

fn time_cap_for(is_weekend: bool, preferences: &Preferences) -> u32 {
    if is_weekend {
        preferences.weekend_max_minutes_or_default()
    } else {
        preferences.weekday_max_minutes_or_default()
    }
}

/// Schedule the slots of a `/plan` request (no shelf-life floors).
#[must_use]
pub fn schedule_plan_slots(slots: &[Slot], preferences: &Preferences) -> Vec<ScheduledSlot> {
    slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let is_weekend = slot.weekday.is_weekend();
            let time_cap = time_cap_for(is_weekend, preferences);
            ScheduledSlot {
                slot: *slot,
                is_weekend,
                time_cap,
                complexity_band: complexity_band(is_weekend, time_cap, idx),
                target_day_index: None,
                min_shelf_life_required: None,
            }
        })
        .collect()
}

/// Schedule the slots of a `/meal-prep-kit` request, computing
/// shelf-life floors from each slot's position in the calendar week
/// (spec.md §3, §4.1, §8 scenario 2: days `[Mon, Wed, Fri]` yield
/// floors `1, 3, 5`, i.e. `Weekday::index() + 1`, not the slot's
/// position within the caller-supplied `days` list).
#[must_use]
pub fn schedule_kit_slots(
    slots: &[Slot],
    _days: &[Weekday],
    preferences: &Preferences,
) -> Vec<ScheduledSlot> {
    slots
        .iter()
        .enumerate()
        .map(|(idx, slot)| {
            let is_weekend = slot.weekday.is_weekend();
            let time_cap = time_cap_for(is_weekend, preferences);
            let target_day_index = slot.weekday.index();
            ScheduledSlot {
                slot: *slot,
                is_weekend,
                time_cap,
                complexity_band: complexity_band(is_weekend, time_cap, idx),
                target_day_index: Some(target_day_index),
                #[allow(clippy::cast_possible_truncation)]
                min_shelf_life_required: Some((target_day_index + 1) as u8),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    #[test]
    fn weekday_with_default_prefs_is_simple() {
        let prefs = Preferences::default();
        let scheduled =
            schedule_plan_slots(&[Slot::new(Weekday::Mon, MealType::Dinner)], &prefs);
        assert_eq!(scheduled[0].time_cap, 30);
        assert_eq!(scheduled[0].complexity_band, ComplexityBand::Simple);
        assert!(!scheduled[0].is_weekend);
    }

    #[test]
    fn weekend_with_generous_time_and_even_index_is_complex() {
        let prefs = Preferences::default();
        let slots = [
            Slot::new(Weekday::Sat, MealType::Lunch),
            Slot::new(Weekday::Sat, MealType::Dinner),
        ];
        let scheduled = schedule_plan_slots(&slots, &prefs);
        assert_eq!(scheduled[0].complexity_band, ComplexityBand::Complex);
        assert_eq!(scheduled[1].complexity_band, ComplexityBand::Medium);
    }

    #[test]
    fn kit_shelf_life_floor_matches_target_day_index() {
        let prefs = Preferences::default();
        let days = [Weekday::Mon, Weekday::Wed, Weekday::Fri];
        let slots = [
            Slot::new(Weekday::Mon, MealType::Lunch),
            Slot::new(Weekday::Wed, MealType::Lunch),
            Slot::new(Weekday::Fri, MealType::Lunch),
        ];
        let scheduled = schedule_kit_slots(&slots, &days, &prefs);
        assert_eq!(scheduled[0].min_shelf_life_required, Some(1));
        assert_eq!(scheduled[1].min_shelf_life_required, Some(3));
        assert_eq!(scheduled[2].min_shelf_life_required, Some(5));
    }
}
