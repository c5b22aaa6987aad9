// ABOUTME: Stateless transcript-scanning classifier for chat turns, plus the propose/confirm state machine shape
// ABOUTME: Classification order is first-match-wins: plan-display, confirmation, add-meal, modify-recipe, Q&A/nutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{ChatTurn, MealType, ModificationType, RecipeRef, UserContext, Weekday};

const PLAN_KEYWORDS_FR: [&str; 8] = [
    "mon plan", "le plan", "mon menu", "le menu", "semaine", "cette semaine", "plan actuel",
    "plan de la semaine",
];
const PLAN_KEYWORDS_EN: [&str; 8] = [
    "my plan", "the plan", "my menu", "the menu", "week", "this week", "current plan",
    "week plan",
];
const PLAN_QUESTION_WORDS_FR: [&str; 4] = ["quel", "quelle", "montre", "affiche"];
const PLAN_QUESTION_WORDS_EN: [&str; 4] = ["what", "which", "show", "display"];

const CONFIRMATION_WORDS_FR: [&str; 7] =
    ["oui", "ok", "confirme", "accepte", "d'accord", "parfait", "vas-y"];
const CONFIRMATION_WORDS_EN: [&str; 6] = ["yes", "ok", "confirm", "accept", "sure", "perfect"];

const CONFIRMATION_ASKING_MARKERS_FR: [&str; 2] = ["voulez-vous", "souhaitez-vous"];
const CONFIRMATION_ASKING_MARKERS_EN: [&str; 2] = ["would you like", "do you want"];

const ADD_KEYWORDS_FR: [&str; 6] = ["ajoute", "ajouter", "crée", "créer", "génère", "propose"];
const ADD_KEYWORDS_EN: [&str; 5] = ["add", "create", "generate", "suggest", "propose"];

const MODIFY_KEYWORDS_FR: [&str; 6] = ["remplace", "substitue", "change", "modifie", "ajuste", "double"];
const MODIFY_KEYWORDS_EN: [&str; 6] = ["replace", "substitute", "change", "modify", "adjust", "swap"];

const QUESTION_ABOUT_POSSIBILITY_FR: [&str; 4] = ["est-ce que", "puis-je", "pourrais-je", "devrais-je"];
const QUESTION_ABOUT_POSSIBILITY_EN: [&str; 4] = ["can i", "could i", "should i", "may i"];
const ACTION_REQUEST_FR: [&str; 2] = ["peux-tu", "pourrais-tu"];
const ACTION_REQUEST_EN: [&str; 3] = ["can you", "could you", "would you"];

const RECIPE_QA_KEYWORDS_FR: [&str; 6] =
    ["recette", "substituer", "remplacer", "conversion", "ingrédient", "cuisson"];
const RECIPE_QA_KEYWORDS_EN: [&str; 6] =
    ["recipe", "substitute", "replace", "conversion", "ingredient", "cooking"];

const REMOVE_TOKENS_FR: [&str; 10] =
    ["ajoute", "ajouter", "crée", "créer", "génère", "générer", "propose", "proposer", "pour", "le"];
const REMOVE_TOKENS_EN: [&str; 6] = ["add", "create", "generate", "suggest", "propose", "for"];

/// What the router decided about the current turn (spec.md §4.10).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterIntent {
    /// Show the formatted current plan; no LLM call.
    PlanDisplay,
    /// The user is confirming a pending proposal from the prior turn.
    Confirmation,
    /// Add a new meal to the given slot.
    AddMeal {
        /// Target weekday.
        weekday: Weekday,
        /// Target meal type.
        meal_type: MealType,
        /// Free-text dish description, with add-verbs and date tokens stripped.
        description: String,
    },
    /// An add-meal request was detected but weekday and/or meal type is missing.
    AddMealMissingSlot {
        /// `true` if the weekday could not be extracted.
        weekday_missing: bool,
        /// `true` if the meal type could not be extracted.
        meal_type_missing: bool,
    },
    /// Modify an existing recipe found in the user's context.
    ModifyRecipe {
        /// The recipe located in current plan / recent / favorites.
        target: RecipeRef,
        /// Which kind of modification this is.
        modification_type: ModificationType,
        /// `true` if phrased as a question about possibility rather than a command.
        is_question: bool,
    },
    /// Fallback: cooking/recipe question.
    RecipeQa,
    /// Fallback: general nutrition question.
    NutritionCoach,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn is_plan_display_request(message_lower: &str) -> bool {
    let mentions_plan = contains_any(message_lower, &PLAN_KEYWORDS_FR) || contains_any(message_lower, &PLAN_KEYWORDS_EN);
    let is_question = contains_any(message_lower, &PLAN_QUESTION_WORDS_FR)
        || contains_any(message_lower, &PLAN_QUESTION_WORDS_EN)
        || message_lower.ends_with('?')
        || message_lower.starts_with("montre")
        || message_lower.starts_with("show");
    mentions_plan && is_question
}

fn is_confirmation_word(message_lower: &str) -> bool {
    let trimmed = message_lower.trim();
    CONFIRMATION_WORDS_FR
        .iter()
        .chain(CONFIRMATION_WORDS_EN.iter())
        .any(|kw| trimmed == *kw || trimmed.starts_with(kw))
}

fn last_assistant_turn(history: &[ChatTurn]) -> Option<&ChatTurn> {
    history.iter().rev().find(|t| !t.is_from_user)
}

fn assistant_turn_asks_for_confirmation(turn: &ChatTurn) -> bool {
    let lower = turn.content.to_lowercase();
    contains_any(&lower, &CONFIRMATION_ASKING_MARKERS_FR) || contains_any(&lower, &CONFIRMATION_ASKING_MARKERS_EN)
}

fn extract_meal_type(message_lower: &str) -> Option<MealType> {
    const BREAKFAST: [&str; 3] = ["breakfast", "petit-déjeuner", "petit déjeuner"];
    const LUNCH: [&str; 2] = ["lunch", "dîner"];
    const DINNER: [&str; 2] = ["dinner", "souper"];
    if contains_any(message_lower, &BREAKFAST) {
        Some(MealType::Breakfast)
    } else if contains_any(message_lower, &LUNCH) {
        Some(MealType::Lunch)
    } else if contains_any(message_lower, &DINNER) {
        Some(MealType::Dinner)
    } else {
        None
    }
}

fn extract_weekday(message_lower: &str) -> Option<Weekday> {
    const TABLE: [(Weekday, [&str; 2]); 7] = [
        (Weekday::Mon, ["lundi", "monday"]),
        (Weekday::Tue, ["mardi", "tuesday"]),
        (Weekday::Wed, ["mercredi", "wednesday"]),
        (Weekday::Thu, ["jeudi", "thursday"]),
        (Weekday::Fri, ["vendredi", "friday"]),
        (Weekday::Sat, ["samedi", "saturday"]),
        (Weekday::Sun, ["dimanche", "sunday"]),
    ];
    TABLE
        .iter()
        .find(|(_, kws)| contains_any(message_lower, kws))
        .map(|(day, _)| *day)
}

/// Strip add-verbs, day names, meal-type names, and filler words from a
/// free-text add-meal request, leaving the dish description (spec.md
/// §4.10 point 3).
#[must_use]
pub fn strip_add_meal_tokens(message: &str) -> String {
    let mut text = message.to_lowercase();
    for token in REMOVE_TOKENS_FR.iter().chain(REMOVE_TOKENS_EN.iter()) {
        text = text.replace(token, " ");
    }
    for (_, kws) in [
        (Weekday::Mon, ["lundi", "monday"]),
        (Weekday::Tue, ["mardi", "tuesday"]),
        (Weekday::Wed, ["mercredi", "wednesday"]),
        (Weekday::Thu, ["jeudi", "thursday"]),
        (Weekday::Fri, ["vendredi", "friday"]),
        (Weekday::Sat, ["samedi", "saturday"]),
        (Weekday::Sun, ["dimanche", "sunday"]),
    ] {
        for kw in kws {
            text = text.replace(kw, " ");
        }
    }
    for kw in ["petit-déjeuner", "petit déjeuner", "déjeuner", "dîner", "souper", "breakfast", "lunch", "dinner"] {
        text = text.replace(kw, " ");
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_modification_question(message_lower: &str) -> bool {
    let is_question = contains_any(message_lower, &QUESTION_ABOUT_POSSIBILITY_FR)
        || contains_any(message_lower, &QUESTION_ABOUT_POSSIBILITY_EN);
    let is_action_request = contains_any(message_lower, &ACTION_REQUEST_FR) || contains_any(message_lower, &ACTION_REQUEST_EN);
    is_question && !is_action_request
}

fn modification_type_for(message_lower: &str) -> ModificationType {
    const PORTION_KEYWORDS: [&str; 7] = ["portion", "portions", "servings", "double", "triple", "moitié", "half"];
    if contains_any(message_lower, &PORTION_KEYWORDS) {
        ModificationType::AdjustPortions
    } else {
        ModificationType::ReplaceIngredient
    }
}

fn title_is_mentioned(title_lower: &str, message_lower: &str) -> bool {
    if title_lower.is_empty() {
        return false;
    }
    message_lower.contains(title_lower)
        || message_lower.split_whitespace().any(|word| word.len() > 4 && title_lower.contains(word))
}

fn find_target_recipe(message_lower: &str, context: &UserContext) -> Option<RecipeRef> {
    for meals in context.current_plan.values() {
        for meal in meals {
            if title_is_mentioned(&meal.title.to_lowercase(), message_lower) {
                return Some(RecipeRef { title: meal.title.clone(), servings: meal.servings });
            }
        }
    }
    context
        .recent_recipes
        .iter()
        .chain(context.favorite_recipes.iter())
        .find(|r| title_is_mentioned(&r.title.to_lowercase(), message_lower))
        .cloned()
}

fn has_recipe_context(history: &[ChatTurn]) -> bool {
    history.iter().rev().take(5).any(|t| {
        let lower = t.content.to_lowercase();
        lower.contains("recipe") || lower.contains("recette")
    })
}

/// Which system prompt the Chat Orchestrator should use. Computed
/// independently of [`RouterIntent`]: even a plan-display or add-meal
/// turn carries a `detected_mode` in its reply (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Cooking / recipe technique question.
    RecipeQa,
    /// General nutrition question.
    NutritionCoach,
}

/// Keyword-and-context classification of which system prompt applies.
#[must_use]
pub fn detect_mode(message: &str, history: &[ChatTurn]) -> ChatMode {
    let message_lower = message.to_lowercase();
    let matches_recipe_qa_keyword =
        contains_any(&message_lower, &RECIPE_QA_KEYWORDS_FR) || contains_any(&message_lower, &RECIPE_QA_KEYWORDS_EN);
    if matches_recipe_qa_keyword || has_recipe_context(history) {
        ChatMode::RecipeQa
    } else {
        ChatMode::NutritionCoach
    }
}

/// Classify the current chat turn (spec.md §4.10). Pure: no I/O, no
/// mutation of `history` or `context`.
#[must_use]
pub fn classify_intent(message: &str, history: &[ChatTurn], context: &UserContext) -> RouterIntent {
    let message_lower = message.to_lowercase();

    if is_plan_display_request(&message_lower) && !context.current_plan.is_empty() {
        return RouterIntent::PlanDisplay;
    }

    if is_confirmation_word(&message_lower) {
        if let Some(turn) = last_assistant_turn(history) {
            if assistant_turn_asks_for_confirmation(turn) {
                return RouterIntent::Confirmation;
            }
        }
    }

    let is_add_request = contains_any(&message_lower, &ADD_KEYWORDS_FR) || contains_any(&message_lower, &ADD_KEYWORDS_EN);
    if is_add_request {
        let weekday = extract_weekday(&message_lower);
        let meal_type = extract_meal_type(&message_lower);
        match (weekday, meal_type) {
            (Some(weekday), Some(meal_type)) => {
                return RouterIntent::AddMeal { weekday, meal_type, description: strip_add_meal_tokens(message) };
            }
            (weekday, meal_type) => {
                return RouterIntent::AddMealMissingSlot {
                    weekday_missing: weekday.is_none(),
                    meal_type_missing: meal_type.is_none(),
                };
            }
        }
    }

    let is_modify_request = contains_any(&message_lower, &MODIFY_KEYWORDS_FR) || contains_any(&message_lower, &MODIFY_KEYWORDS_EN);
    if is_modify_request && !is_modification_question(&message_lower) {
        if let Some(target) = find_target_recipe(&message_lower, context) {
            return RouterIntent::ModifyRecipe {
                target,
                modification_type: modification_type_for(&message_lower),
                is_question: false,
            };
        }
    }

    match detect_mode(message, history) {
        ChatMode::RecipeQa => RouterIntent::RecipeQa,
        ChatMode::NutritionCoach => RouterIntent::NutritionCoach,
    }
}
