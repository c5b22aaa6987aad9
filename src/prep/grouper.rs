// ABOUTME: Groups similar prep steps (cutting, peeling, mixing, ...) across a kit's recipes
// ABOUTME: Keyword-classifies each recipe's leading steps, merges by action type, sorts by priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use crate::models::{ActionType, GroupedIngredient, GroupedPrepStep, KitRecipeRef, Language};

/// Cooking-verb cutoff used regardless of language (spec.md §4.8: once
/// a cooking step appears past the third step, stop scanning for prep).
const COOKING_INDICATORS: [&str; 10] =
    ["cuire", "cook", "chauffer", "heat", "griller", "grill", "rôtir", "roast", "frire", "fry"];

fn action_keywords(language: Language) -> [(ActionType, &'static [&'static str]); 7] {
    match language {
        Language::Fr => [
            (ActionType::Cut, &["couper", "découper", "trancher", "émincer", "hacher"]),
            (ActionType::Grate, &["râper", "gratter"]),
            (ActionType::Peel, &["éplucher", "peler"]),
            (ActionType::Mix, &["mélanger", "mélange", "combiner", "battre"]),
            (ActionType::Preheat, &["préchauffer", "chauffer le four"]),
            (ActionType::Marinate, &["mariner", "faire mariner"]),
            (ActionType::Measure, &["mesurer", "peser"]),
        ],
        Language::En => [
            (ActionType::Cut, &["chop", "dice", "cut", "slice", "mince"]),
            (ActionType::Grate, &["grate", "shred"]),
            (ActionType::Peel, &["peel", "skin"]),
            (ActionType::Mix, &["mix", "combine", "whisk", "beat"]),
            (ActionType::Preheat, &["preheat", "heat the oven"]),
            (ActionType::Marinate, &["marinate"]),
            (ActionType::Measure, &["measure", "weigh"]),
        ],
    }
}

fn matched_action(step_lower: &str, keywords: &[(ActionType, &'static [&'static str])]) -> Option<ActionType> {
    keywords
        .iter()
        .find(|(_, kws)| kws.iter().any(|kw| step_lower.contains(kw)))
        .map(|(action, _)| *action)
}

#[derive(Default)]
struct Accumulated {
    ingredients: Vec<GroupedIngredient>,
    detailed_steps: Vec<String>,
    recipes: Vec<String>,
}

fn description(action_type: ActionType, recipes: &[String], language: Language) -> String {
    let label = action_type.localized_label(language);
    match (language, recipes.len()) {
        (Language::Fr, 1) => format!("{label} les ingrédients pour {}", recipes[0]),
        (Language::Fr, n) => format!("{label} les ingrédients pour {n} recettes"),
        (Language::En, 1) => format!("{label} ingredients for {}", recipes[0]),
        (Language::En, n) => format!("{label} ingredients for {n} recipes"),
    }
}

/// Scan every recipe's leading steps for prep actions, merge
/// ingredient mentions by action type, and return the groups sorted
/// by [`ActionType::priority`] (spec.md §4.8). A group with no
/// matched ingredient is dropped.
#[must_use]
pub fn group_preparation_steps(kit_recipes: &[KitRecipeRef], language: Language) -> Vec<GroupedPrepStep> {
    let keywords = action_keywords(language);
    let mut accum: HashMap<ActionType, Accumulated> = HashMap::new();

    for kit_recipe in kit_recipes {
        let recipe = &kit_recipe.recipe;
        let mut prep_steps: Vec<(ActionType, &str)> = Vec::new();

        for (step_idx, step) in recipe.steps.iter().enumerate() {
            let step_lower = step.to_lowercase();
            let hits_cooking_indicator =
                COOKING_INDICATORS.iter().any(|indicator| step_lower.contains(indicator));
            if hits_cooking_indicator && step_idx > 2 {
                break;
            }
            if let Some(action_type) = matched_action(&step_lower, &keywords) {
                prep_steps.push((action_type, step.as_str()));
            }
        }

        for (action_type, step) in prep_steps {
            let step_lower = step.to_lowercase();
            let entry = accum.entry(action_type).or_default();

            for ingredient in &recipe.ingredients {
                let name_lower = ingredient.name.to_lowercase();
                let mentioned = step_lower.contains(&name_lower)
                    || name_lower.split_whitespace().any(|word| step_lower.contains(word));
                if mentioned {
                    entry.ingredients.push(GroupedIngredient {
                        name: ingredient.name.clone(),
                        quantity: format!("{} {}", ingredient.quantity, ingredient.unit),
                        source_recipe: recipe.title.clone(),
                    });
                }
            }

            entry.detailed_steps.push(step.to_owned());
            if !entry.recipes.contains(&recipe.title) {
                entry.recipes.push(recipe.title.clone());
            }
        }
    }

    let mut groups: Vec<GroupedPrepStep> = accum
        .into_iter()
        .filter(|(_, data)| !data.ingredients.is_empty())
        .map(|(action_type, data)| {
            let estimated_minutes = u32::try_from(data.ingredients.len()).unwrap_or(u32::MAX).saturating_mul(2).clamp(5, 20);
            GroupedPrepStep {
                action_type,
                description: description(action_type, &data.recipes, language),
                ingredients: data.ingredients,
                detailed_steps: data.detailed_steps,
                estimated_minutes,
            }
        })
        .collect();

    groups.sort_by_key(|g| g.action_type.priority());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MealType, Recipe, Slot, Weekday};

    fn kit_recipe(title: &str, steps: &[&str], ingredients: &[&str]) -> KitRecipeRef {
        KitRecipeRef {
            recipe: Recipe {
                title: title.to_owned(),
                servings: 4,
                total_minutes: 30,
                ingredients: ingredients
                    .iter()
                    .map(|n| Ingredient::new(*n, 1.0, None, None, Language::En))
                    .collect(),
                steps: steps.iter().map(|s| (*s).to_owned()).collect(),
                equipment: vec![],
                tags: vec![],
                storage: None,
                storage_note: None,
            },
            shelf_life_days: 3,
            is_freezable: true,
            storage_note: String::new(),
            slot: Slot::new(Weekday::Mon, MealType::Dinner),
        }
    }

    #[test]
    fn groups_chop_steps_across_two_recipes_and_sorts_by_priority() {
        let kits = vec![
            kit_recipe(
                "Stir Fry",
                &["Dice the chicken breast.", "Preheat the pan.", "Cook over high heat."],
                &["chicken breast"],
            ),
            kit_recipe(
                "Tacos",
                &["Dice the onion finely.", "Cook the beef until browned."],
                &["onion"],
            ),
        ];
        let groups = group_preparation_steps(&kits, Language::En);
        assert_eq!(groups[0].action_type, ActionType::Cut);
        assert_eq!(groups[0].ingredients.len(), 2);
        assert!(groups[0].description.contains("2 recipes"));
    }

    #[test]
    fn stops_scanning_for_prep_past_third_step_once_cooking_begins() {
        let kits = vec![kit_recipe(
            "Slow Braise",
            &[
                "Dice the carrots.",
                "Peel the potatoes.",
                "Chop the celery.",
                "Cook for three hours.",
                "Mix in the herbs.",
            ],
            &["carrots", "potatoes", "celery", "herbs"],
        )];
        let groups = group_preparation_steps(&kits, Language::En);
        assert!(!groups.iter().any(|g| g.action_type == ActionType::Mix));
    }

    #[test]
    fn group_with_no_matched_ingredient_is_dropped() {
        let kits = vec![kit_recipe("Plain", &["Preheat the oven to 400F."], &["chicken"])];
        let groups = group_preparation_steps(&kits, Language::En);
        assert!(groups.is_empty());
    }

    #[test]
    fn estimated_minutes_is_clamped_between_five_and_twenty() {
        let many_ingredients: Vec<&str> =
            vec!["onion", "carrot", "celery", "garlic", "ginger", "leek", "fennel", "shallot", "chive", "parsley", "basil"];
        let step = "Dice the onion, carrot, celery, garlic, ginger, leek, fennel, shallot, chive, parsley, and basil finely.";
        let kits = vec![kit_recipe("Mirepoix", &[step], &many_ingredients)];
        let groups = group_preparation_steps(&kits, Language::En);
        assert_eq!(groups[0].estimated_minutes, 20);
    }

    #[test]
    fn french_description_uses_singular_recipe_name() {
        let kits = vec![kit_recipe("Ragoût", &["Couper les carottes en dés."], &["carottes"])];
        let groups = group_preparation_steps(&kits, Language::Fr);
        assert_eq!(groups[0].description, "Couper les ingrédients pour Ragoût");
    }
}
