// ABOUTME: Plan-mode and kit-mode protein distribution algorithms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use rand::seq::SliceRandom;
use tracing::warn;

use crate::models::{MealType, Preferences, Slot};

const DEFAULT_PLAN_PROTEINS: [&str; 9] = [
    "chicken", "beef", "pork", "fish", "salmon", "shrimp", "tofu", "turkey", "lamb",
];

const DEFAULT_KIT_PROTEINS: [&str; 10] = [
    "chicken", "beef", "pork", "fish", "salmon", "shrimp", "tofu", "turkey", "lamb", "tuna",
];

const BREAKFAST_PROTEINS: [&str; 5] = ["eggs", "turkey", "salmon", "tofu", "yogurt"];

const BREAKFAST_ONLY: [&str; 3] = ["eggs", "yogurt", "bacon"];

fn build_plan_pool(preferences: &Preferences) -> Vec<String> {
    let preferred: Vec<String> = preferences.preferred_proteins.iter().cloned().collect();
    let mut pool = if preferred.is_empty() {
        DEFAULT_PLAN_PROTEINS.iter().map(|s| (*s).to_owned()).collect()
    } else {
        preferred
    };
    if pool.len() < 3 {
        let mut set: HashSet<String> = pool.into_iter().collect();
        set.extend(DEFAULT_PLAN_PROTEINS[..5].iter().map(|s| (*s).to_owned()));
        pool = set.into_iter().collect();
    }
    pool
}

/// Distribute one suggested protein per slot (spec.md §4.3 plan mode).
#[must_use]
pub fn distribute_for_plan(slots: &[Slot], preferences: &Preferences) -> Vec<String> {
    let pool = build_plan_pool(preferences);
    let mut shuffled = pool;
    shuffled.shuffle(&mut rand::thread_rng());

    let mut suggested: Vec<String> = Vec::with_capacity(slots.len());
    for (i, slot) in slots.iter().enumerate() {
        if slot.meal_type == MealType::Breakfast {
            let recent: HashSet<&str> = suggested
                .iter()
                .rev()
                .take(2)
                .map(String::as_str)
                .collect();
            let available: Vec<&str> = BREAKFAST_PROTEINS
                .iter()
                .copied()
                .filter(|p| !recent.contains(p))
                .collect();
            let pool = if available.is_empty() {
                BREAKFAST_PROTEINS.as_slice()
            } else {
                &available
            };
            let choice = pool.choose(&mut rand::thread_rng()).unwrap_or(&BREAKFAST_PROTEINS[0]);
            suggested.push((*choice).to_owned());
        } else {
            let mut idx = i % shuffled.len();
            let mut protein = shuffled[idx].clone();
            if suggested.last() == Some(&protein) {
                idx = (idx + 1) % shuffled.len();
                protein = shuffled[idx].clone();
            }
            suggested.push(protein);
        }
    }
    suggested
}

fn build_kit_pool(num_recipes: usize, preferences: &Preferences) -> Vec<String> {
    let preferred: Vec<String> = preferences.preferred_proteins.iter().cloned().collect();
    let mut pool: Vec<String> = if preferred.is_empty() {
        DEFAULT_KIT_PROTEINS.iter().map(|s| (*s).to_owned()).collect()
    } else {
        preferred
            .into_iter()
            .filter(|p| !BREAKFAST_ONLY.contains(&p.as_str()))
            .collect()
    };
    if pool.len() < 3 {
        let mut set: HashSet<String> = pool.into_iter().collect();
        set.extend(DEFAULT_KIT_PROTEINS[..7].iter().map(|s| (*s).to_owned()));
        pool = set.into_iter().collect();
    }
    let min_unique = 2.max(num_recipes.saturating_sub(1));
    if pool.len() < min_unique {
        let deficit = min_unique - pool.len();
        pool.extend(DEFAULT_KIT_PROTEINS.iter().take(deficit).map(|s| (*s).to_owned()));
    }
    pool
}

/// Distribute proteins for a meal-prep kit (spec.md §4.3 kit mode).
///
/// Postcondition (logged, not enforced, if violated): `unique(proteins)
/// >= max(2, num_recipes - 1)` and every protein is used at most
/// twice, except the last slot may repeat when the walk cannot avoid it.
#[must_use]
pub fn distribute_for_kit(num_recipes: usize, preferences: &Preferences) -> Vec<String> {
    if num_recipes == 0 {
        return Vec::new();
    }
    let min_unique = 2.max(num_recipes.saturating_sub(1));
    let mut pool = build_kit_pool(num_recipes, preferences);
    pool.shuffle(&mut rand::thread_rng());

    let mut suggested: Vec<String> = Vec::with_capacity(num_recipes);
    let mut counts: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
    let mut pool_index = 0usize;

    for i in 0..num_recipes {
        let max_attempts = pool.len() * 2;
        let mut placed = false;
        for _ in 0..max_attempts {
            let candidate = pool[pool_index % pool.len()].clone();
            pool_index += 1;
            let count = *counts.get(&candidate).unwrap_or(&0);
            if count < 2 {
                let is_repeat = suggested.last() == Some(&candidate);
                if !is_repeat || i == num_recipes - 1 {
                    suggested.push(candidate.clone());
                    counts.insert(candidate, count + 1);
                    placed = true;
                    break;
                }
            }
        }
        if !placed {
            let fallback = pool[i % pool.len()].clone();
            warn!(slot_index = i, protein = %fallback, "protein distributor: last-slot repetition forced");
            counts.entry(fallback.clone()).and_modify(|c| *c += 1).or_insert(1);
            suggested.push(fallback);
        }
    }

    let unique_count = suggested.iter().collect::<HashSet<_>>().len();
    let max_repetitions = counts.values().copied().max().unwrap_or(0);
    if unique_count < min_unique || max_repetitions > 2 {
        warn!(
            unique_count,
            min_unique, max_repetitions, "protein distributor: postcondition violated"
        );
    }

    suggested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    #[test]
    fn plan_distribution_covers_every_slot() {
        // Spec.md §4.3: a preferred-proteins pool smaller than 3 is
        // unioned with the top 5 defaults, so the result isn't limited
        // to just the two preferred proteins.
        let prefs = Preferences {
            preferred_proteins: ["chicken".to_owned(), "beef".to_owned()].into_iter().collect(),
            ..Default::default()
        };
        let slots = [
            Slot::new(Weekday::Mon, MealType::Lunch),
            Slot::new(Weekday::Mon, MealType::Dinner),
        ];
        let proteins = distribute_for_plan(&slots, &prefs);
        assert_eq!(proteins.len(), 2);
        let allowed: HashSet<&str> = DEFAULT_PLAN_PROTEINS[..5]
            .iter()
            .copied()
            .chain(["chicken", "beef"])
            .collect();
        assert!(proteins.iter().all(|p| allowed.contains(p.as_str())));
    }

    #[test]
    fn plan_distribution_with_ample_preferred_pool_stays_within_it() {
        let prefs = Preferences {
            preferred_proteins: ["chicken".to_owned(), "beef".to_owned(), "tofu".to_owned()]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let slots = [
            Slot::new(Weekday::Mon, MealType::Lunch),
            Slot::new(Weekday::Tue, MealType::Dinner),
            Slot::new(Weekday::Wed, MealType::Dinner),
        ];
        let proteins = distribute_for_plan(&slots, &prefs);
        assert_eq!(proteins.len(), 3);
        assert!(proteins.iter().all(|p| p == "chicken" || p == "beef" || p == "tofu"));
    }

    #[test]
    fn kit_distribution_respects_min_unique_and_max_repetitions() {
        let prefs = Preferences::default();
        for num_recipes in 1..=8 {
            let proteins = distribute_for_kit(num_recipes, &prefs);
            assert_eq!(proteins.len(), num_recipes);
            let unique_count = proteins.iter().collect::<HashSet<_>>().len();
            let min_unique = 2.max(num_recipes.saturating_sub(1)).min(num_recipes.max(1));
            if num_recipes >= 2 {
                assert!(unique_count >= min_unique.min(num_recipes), "num_recipes={num_recipes}");
            }
        }
    }

    #[test]
    fn kit_distribution_excludes_breakfast_only_proteins() {
        let prefs = Preferences {
            preferred_proteins: ["eggs".to_owned(), "yogurt".to_owned(), "chicken".to_owned()]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let proteins = distribute_for_kit(3, &prefs);
        assert!(!proteins.iter().any(|p| p == "eggs" || p == "yogurt"));
    }
}
