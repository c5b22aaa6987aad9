// ABOUTME: Exact/keyword/substring matching against a normalized deal set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use crate::models::Recipe;

/// Qualifier words stripped before keyword matching (spec.md §4.7, §9
/// "Stopword and synonym tables": bundled as process-local constants).
const STOP_WORDS: [&str; 17] = [
    "fresh", "frozen", "organic", "diced", "chopped", "sliced", "ground", "raw", "cooked",
    "frais", "fraiche", "fraîche", "congelé", "congele", "bio", "haché", "hache",
];

fn keywords(name_lower: &str) -> Vec<&str> {
    name_lower
        .split_whitespace()
        .filter(|token| token.len() > 3 && !STOP_WORDS.contains(token))
        .collect()
}

fn is_on_sale(ingredient_name: &str, deals: &HashSet<String>) -> bool {
    let name_lower = ingredient_name.to_lowercase();

    if deals.contains(&name_lower) {
        return true;
    }

    if keywords(&name_lower).iter().any(|kw| deals.contains(*kw)) {
        return true;
    }

    deals
        .iter()
        .any(|deal| deal.len() >= 5 && name_lower.contains(deal.as_str()))
}

/// Set `on_sale` on every ingredient of `recipe` against `deals`
/// (already-normalized, bilingually expanded deal names). Idempotent.
pub fn mark_on_sale(recipe: &mut Recipe, deals: &HashSet<String>) {
    for ingredient in &mut recipe.ingredients {
        ingredient.on_sale = is_on_sale(&ingredient.name, deals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Language};

    fn recipe_with(names: &[&str]) -> Recipe {
        Recipe {
            title: "Test".to_owned(),
            servings: 4,
            total_minutes: 30,
            ingredients: names
                .iter()
                .map(|n| Ingredient::new(*n, 1.0, None, None, Language::En))
                .collect(),
            steps: vec!["step".to_owned()],
            equipment: vec![],
            tags: vec![],
            storage: None,
            storage_note: None,
        }
    }

    #[test]
    fn exact_match_marks_on_sale() {
        let deals: HashSet<String> = ["chicken".to_owned()].into_iter().collect();
        let mut recipe = recipe_with(&["chicken"]);
        mark_on_sale(&mut recipe, &deals);
        assert!(recipe.ingredients[0].on_sale);
    }

    #[test]
    fn stop_words_are_stripped_before_keyword_match() {
        let deals: HashSet<String> = ["carrots".to_owned()].into_iter().collect();
        let mut recipe = recipe_with(&["fresh carrots"]);
        mark_on_sale(&mut recipe, &deals);
        assert!(recipe.ingredients[0].on_sale);
    }

    #[test]
    fn long_deal_substring_matches() {
        let deals: HashSet<String> = ["broccoli".to_owned()].into_iter().collect();
        let mut recipe = recipe_with(&["broccoli florets"]);
        mark_on_sale(&mut recipe, &deals);
        assert!(recipe.ingredients[0].on_sale);
    }

    #[test]
    fn no_match_leaves_on_sale_false() {
        let deals: HashSet<String> = ["tofu".to_owned()].into_iter().collect();
        let mut recipe = recipe_with(&["chicken breast"]);
        mark_on_sale(&mut recipe, &deals);
        assert!(!recipe.ingredients[0].on_sale);
    }

    #[test]
    fn matcher_is_idempotent() {
        let deals: HashSet<String> = ["chicken".to_owned()].into_iter().collect();
        let mut recipe = recipe_with(&["chicken"]);
        mark_on_sale(&mut recipe, &deals);
        let first_pass = recipe.ingredients[0].on_sale;
        mark_on_sale(&mut recipe, &deals);
        assert_eq!(first_pass, recipe.ingredients[0].on_sale);
    }
}
