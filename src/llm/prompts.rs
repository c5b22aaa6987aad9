// ABOUTME: Shared, literal system/user prompt fragments used across LLM call sites
// ABOUTME: Nutrition disclaimer and chat system prompts, kept as tested string constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fixed prompt text that is not assembled per-request (see
//! [`crate::prompt::assembler`] for the per-recipe prompt). Every
//! string here is a literal contract: tests pin the disclaimer and
//! the `📅` markers verbatim since clients parse them.

use crate::models::Language;

/// System prompt for the recipe-generation LLM call.
#[must_use]
pub const fn recipe_generation_system_prompt(language: Language) -> &'static str {
    match language {
        Language::Fr => {
            "Tu es un chef cuisinier créatif et expert qui génère des recettes uniques \
             et détaillées en JSON. Tu varies toujours les ingrédients, cuisines et techniques."
        }
        Language::En => {
            "You are a creative, expert chef who generates unique, detailed recipes in \
             JSON. You always vary ingredients, cuisines, and techniques."
        }
    }
}

/// Mandatory disclaimer the nutrition-coach mode must include in every reply.
#[must_use]
pub const fn nutrition_disclaimer(language: Language) -> &'static str {
    match language {
        Language::Fr => {
            "ℹ️ Cette information est à titre général seulement et ne remplace pas un avis médical professionnel."
        }
        Language::En => {
            "ℹ️ This information is for general purposes only and does not replace professional medical advice."
        }
    }
}

/// System prompt for the `recipe_qa` chat mode.
#[must_use]
pub const fn recipe_qa_system_prompt(language: Language) -> &'static str {
    match language {
        Language::Fr => {
            "Tu es un assistant culinaire compétent, aidant les utilisateurs avec leurs \
             questions de recettes.\n\n\
             Tu peux aider avec:\n\
             - Substitutions d'ingrédients\n\
             - Conversions d'unités\n\
             - Ajustement des portions\n\
             - Instructions de cuisson pas-à-pas\n\
             - Techniques et conseils de cuisine\n\n\
             Sois spécifique et pratique dans tes réponses. Si l'utilisateur mentionne une \
             recette spécifique, référence-la par son nom."
        }
        Language::En => {
            "You are a knowledgeable culinary assistant, helping users with recipe questions.\n\n\
             You can help with:\n\
             - Ingredient substitutions\n\
             - Unit conversions\n\
             - Portion adjustments\n\
             - Step-by-step cooking instructions\n\
             - Cooking techniques and tips\n\n\
             Be specific and practical in your answers. If the user mentions a specific \
             recipe, reference it by name."
        }
    }
}

/// System prompt for the `nutrition_coach` chat mode, including the
/// mandatory disclaimer and the summary-only calorie formatting rule.
#[must_use]
pub fn nutrition_coach_system_prompt(language: Language) -> String {
    match language {
        Language::Fr => format!(
            "Tu es un coach en nutrition, fournissant des informations générales sur la \
             nutrition et des calculs nutritionnels.\n\n\
             CRITIQUE: Tu DOIS inclure ce disclaimer dans CHAQUE réponse:\n\"{}\"\n\n\
             Tu peux fournir des calculs de calories approximatifs pour les recettes, à \
             partir de bases de données nutritionnelles standard.\n\n\
             FORMAT OBLIGATOIRE pour tout calcul calorique: UNIQUEMENT un résumé par \
             portion, sur une seule ligne (ex: \"~650 cal | Protéines: 45g | Glucides: 60g \
             | Lipides: 20g\"). Jamais de détail par ingrédient.\n\n\
             Tu NE PEUX PAS fournir de diagnostics médicaux ni de plans de traitement.",
            nutrition_disclaimer(Language::Fr)
        ),
        Language::En => format!(
            "You are a nutrition coach, providing general nutrition information and \
             calculations.\n\n\
             CRITICAL: You MUST include this disclaimer in EVERY response:\n\"{}\"\n\n\
             You can provide approximate calorie calculations for recipes, using standard \
             nutritional reference values.\n\n\
             MANDATORY FORMAT for any calorie calculation: ONLY a per-serving summary on a \
             single line (e.g. \"~650 cal | Protein: 45g | Carbs: 60g | Fat: 20g\"). Never a \
             per-ingredient breakdown.\n\n\
             You CANNOT provide medical diagnoses or treatment plans.",
            nutrition_disclaimer(Language::En)
        ),
    }
}

/// Literal prefix the client relies on to detect a plan-display reply (spec.md §6).
#[must_use]
pub const fn plan_display_marker(language: Language) -> &'static str {
    match language {
        Language::Fr => "📅 PLAN ACTUEL",
        Language::En => "📅 CURRENT PLAN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrition_coach_prompt_contains_disclaimer_verbatim() {
        let prompt = nutrition_coach_system_prompt(Language::Fr);
        assert!(prompt.contains(nutrition_disclaimer(Language::Fr)));
        let prompt_en = nutrition_coach_system_prompt(Language::En);
        assert!(prompt_en.contains(nutrition_disclaimer(Language::En)));
    }

    #[test]
    fn plan_display_marker_matches_client_contract() {
        assert_eq!(plan_display_marker(Language::Fr), "📅 PLAN ACTUEL");
        assert_eq!(plan_display_marker(Language::En), "📅 CURRENT PLAN");
    }
}
