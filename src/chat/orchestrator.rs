// ABOUTME: Drives the LLM for non-mutating chat turns and composes the final reply
// ABOUTME: Dispatches on the Intent Router's classification: plan display, add-meal, modify, Q&A/nutrition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::llm::adapter::generate_recipe_with_retry;
use crate::llm::prompts::{nutrition_coach_system_prompt, plan_display_marker, recipe_qa_system_prompt};
use crate::llm::{ChatMessage, ChatRequest, LlmClient};
use crate::matching::mark_on_sale;
use crate::models::{
    ChatTurn, ComplexityBand, Constraints, Language, MealType, ModificationType, PendingModification, Recipe,
    UserContext, Weekday,
};
use crate::prompt::{assemble_recipe_prompt, PromptInputs};

use super::intent_router::{classify_intent, detect_mode, RouterIntent};
use super::ChatMode;

/// Metadata the client needs to stage a pending add-meal proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMealMetadata {
    /// Target weekday.
    pub weekday: Weekday,
    /// Target meal type.
    pub meal_type: MealType,
}

/// The Chat Orchestrator's composed reply (spec.md §6 `/chat`
/// response shape, minus transport-level envelope fields).
#[derive(Debug, Clone)]
pub struct ChatReply {
    /// Text shown to the user.
    pub reply: String,
    /// Which system prompt generated this reply.
    pub detected_mode: ChatMode,
    /// Whether the reply is itself asking the user to confirm something.
    pub requires_confirmation: bool,
    /// Quick-reply suggestions for the client to render.
    pub suggested_actions: Vec<String>,
    /// A freshly generated recipe staged for the client to persist once confirmed.
    pub modified_recipe: Option<Recipe>,
    /// The full proposal the client should hold until the next user turn
    /// confirms or discards it (spec.md §6 `pending_recipe_modification`).
    pub pending_recipe_modification: Option<PendingModification>,
    /// What kind of modification `modified_recipe` represents, if any.
    pub modification_type: Option<ModificationType>,
    /// Add-meal target slot, when `modification_type == PendingAddMeal`.
    pub modification_metadata: Option<AddMealMetadata>,
}

impl ChatReply {
    fn text(reply: impl Into<String>, detected_mode: ChatMode) -> Self {
        Self {
            reply: reply.into(),
            detected_mode,
            requires_confirmation: false,
            suggested_actions: Vec::new(),
            modified_recipe: None,
            pending_recipe_modification: None,
            modification_type: None,
            modification_metadata: None,
        }
    }
}

fn format_plan_display(context: &UserContext, language: Language) -> String {
    let mut reply = match language {
        Language::Fr => String::from("📅 PLAN ACTUEL\n\nVoici votre plan de repas pour la semaine:\n\n"),
        Language::En => String::from("📅 CURRENT PLAN\n\nHere's your meal plan for the week:\n\n"),
    };
    debug_assert!(reply.starts_with(plan_display_marker(language)));

    for weekday in Weekday::ORDERED {
        let Some(meals) = context.current_plan.get(&weekday) else {
            continue;
        };
        reply.push_str(weekday.localized_name(language));
        reply.push_str(":\n");
        for meal in meals {
            reply.push_str("  • ");
            reply.push_str(meal.meal_type.localized_name(language));
            reply.push_str(": ");
            reply.push_str(&meal.title);
            reply.push('\n');
        }
        reply.push('\n');
    }

    match language {
        Language::Fr => reply.push_str("💬 Vous pouvez me demander de modifier une recette ou d'en ajouter une nouvelle!"),
        Language::En => reply.push_str("💬 You can ask me to modify a recipe or add a new one!"),
    }
    reply
}

fn add_meal_prompt(description: &str, constraints: &Constraints, context: &UserContext, language: Language) -> String {
    let inputs = PromptInputs {
        language,
        meal_type: MealType::Dinner,
        unit_system: crate::models::UnitSystem::Metric,
        servings: 4,
        constraints,
        preferences: &context.preferences,
        complexity_band: ComplexityBand::Medium,
        time_cap: 45,
        min_shelf_life_required: None,
        concept: None,
        suggested_protein: None,
        other_plan_proteins: &[],
        idea: Some(description),
    };
    assemble_recipe_prompt(&inputs)
}

async fn handle_add_meal(
    client: &dyn LlmClient,
    weekday: Weekday,
    meal_type: MealType,
    description: String,
    context: &UserContext,
    language: Language,
) -> ChatReply {
    let constraints = Constraints::default();
    let prompt = add_meal_prompt(&description, &constraints, context, language);
    let mut recipe = generate_recipe_with_retry(client, &prompt, Some(45), language, 3).await;
    mark_on_sale(&mut recipe, &std::collections::HashSet::new());

    let (day_name, meal_name) = (weekday.localized_name(language), meal_type.localized_name(language));
    let reply = match language {
        Language::Fr => format!(
            "📋 **{}**\n\n🍽️ Pour: {day_name} {meal_name}\n👥 Portions: {}\n⏱️ Temps: {} minutes\n\nVoulez-vous l'ajouter à votre plan?",
            recipe.title, recipe.servings, recipe.total_minutes
        ),
        Language::En => format!(
            "📋 **{}**\n\n🍽️ For: {day_name} {meal_name}\n👥 Servings: {}\n⏱️ Time: {} minutes\n\nWould you like to add it to your plan?",
            recipe.title, recipe.servings, recipe.total_minutes
        ),
    };

    ChatReply {
        reply,
        detected_mode: detect_mode(&description, &[]),
        requires_confirmation: false,
        suggested_actions: Vec::new(),
        pending_recipe_modification: Some(PendingModification {
            original_recipe_title: None,
            proposed_recipe: recipe.clone(),
            modification_type: ModificationType::PendingAddMeal,
            target_weekday: Some(weekday),
            target_meal_type: Some(meal_type),
        }),
        modified_recipe: Some(recipe),
        modification_type: Some(ModificationType::PendingAddMeal),
        modification_metadata: Some(AddMealMetadata { weekday, meal_type }),
    }
}

fn clarification_for_missing_slot(weekday_missing: bool, meal_type_missing: bool, language: Language, detected_mode: ChatMode) -> ChatReply {
    let reply = match (weekday_missing, meal_type_missing, language) {
        (true, true, Language::Fr) => "Pour quel jour et quel repas souhaitez-vous ajouter ceci?",
        (true, true, Language::En) => "Which day and meal would you like to add this to?",
        (true, false, Language::Fr) => "Pour quel jour souhaitez-vous ajouter ce repas?",
        (true, false, Language::En) => "Which day would you like to add this meal to?",
        (false, true, Language::Fr) => "Pour quel repas (déjeuner, dîner, souper) souhaitez-vous ajouter ceci?",
        (false, true, Language::En) => "Which meal (breakfast, lunch, dinner) would you like to add this to?",
        (false, false, _) => unreachable!("missing-slot clarification requires at least one missing field"),
    };
    let mut reply = ChatReply::text(reply, detected_mode);
    reply.requires_confirmation = true;
    reply
}

async fn handle_modify_recipe(
    client: &dyn LlmClient,
    target_title: &str,
    modification_request: &str,
    modification_type: ModificationType,
    context: &UserContext,
    language: Language,
) -> ChatReply {
    let constraints = Constraints { extra: Some(modification_request.to_owned()), ..Default::default() };
    let idea = match language {
        Language::Fr => format!("{target_title} (modifié: {modification_request})"),
        Language::En => format!("{target_title} (modified: {modification_request})"),
    };
    let prompt = add_meal_prompt(&idea, &constraints, context, language);
    let mut recipe = generate_recipe_with_retry(client, &prompt, Some(45), language, 3).await;
    mark_on_sale(&mut recipe, &std::collections::HashSet::new());

    let reply = match language {
        Language::Fr => format!("Voici la version modifiée de **{target_title}**. Voulez-vous confirmer ce changement?"),
        Language::En => format!("Here's the modified version of **{target_title}**. Would you like to confirm this change?"),
    };

    ChatReply {
        reply,
        detected_mode: detect_mode(modification_request, &[]),
        requires_confirmation: true,
        suggested_actions: Vec::new(),
        pending_recipe_modification: Some(PendingModification {
            original_recipe_title: Some(target_title.to_owned()),
            proposed_recipe: recipe.clone(),
            modification_type,
            target_weekday: None,
            target_meal_type: None,
        }),
        modified_recipe: Some(recipe),
        modification_type: Some(modification_type),
        modification_metadata: None,
    }
}

fn build_qa_messages(message: &str, history: &[ChatTurn], context: &UserContext, mode: ChatMode, language: Language) -> Vec<ChatMessage> {
    let system = match mode {
        ChatMode::RecipeQa => recipe_qa_system_prompt(language).to_owned(),
        ChatMode::NutritionCoach => nutrition_coach_system_prompt(language),
    };

    let mut messages = vec![ChatMessage::system(system)];
    for turn in history.iter().rev().take(10).collect::<Vec<_>>().into_iter().rev() {
        messages.push(if turn.is_from_user {
            ChatMessage::user(turn.content.clone())
        } else {
            ChatMessage {
                role: crate::llm::MessageRole::System,
                content: turn.content.clone(),
            }
        });
    }
    let _ = context;
    messages.push(ChatMessage::user(message.to_owned()));
    messages
}

async fn handle_qa(client: &dyn LlmClient, message: &str, history: &[ChatTurn], context: &UserContext, mode: ChatMode, language: Language) -> AppResult<ChatReply> {
    let messages = build_qa_messages(message, history, context, mode, language);
    let request = ChatRequest { messages, temperature: 0.7, max_tokens: 800 };
    let response = client.chat_completion(&request).await?;
    let mut reply_text = response.content.trim().to_owned();

    if mode == ChatMode::NutritionCoach {
        let disclaimer = crate::llm::prompts::nutrition_disclaimer(language);
        if !reply_text.contains(disclaimer) {
            reply_text.push_str("\n\n");
            reply_text.push_str(disclaimer);
        }
    }

    Ok(ChatReply::text(reply_text, mode))
}

/// Classify and answer one chat turn end-to-end (spec.md §4.10, §6
/// `/chat`). Returns [`AppError::Auth`] when `context.has_premium` is
/// false, matching the endpoint's premium gate.
///
/// # Errors
///
/// Propagates [`AppError::Auth`] for the premium gate. LLM failures
/// during recipe generation never surface here (they resolve to
/// [`Recipe::fallback`]); only the plain Q&A path can return a
/// transport/parse error, since it has no fallback text to offer.
pub async fn handle_turn(
    client: &dyn LlmClient,
    message: &str,
    history: &[ChatTurn],
    context: &UserContext,
    language: Language,
) -> AppResult<ChatReply> {
    if !context.has_premium {
        return Err(AppError::Auth("premium subscription required for the conversational agent".to_owned()));
    }

    let detected_mode = detect_mode(message, history);

    match classify_intent(message, history, context) {
        RouterIntent::PlanDisplay => Ok(ChatReply {
            suggested_actions: match language {
                Language::Fr => vec!["Modifier une recette".to_owned(), "Ajouter un repas".to_owned(), "Calculer les calories".to_owned()],
                Language::En => vec!["Modify a recipe".to_owned(), "Add a meal".to_owned(), "Calculate calories".to_owned()],
            },
            ..ChatReply::text(format_plan_display(context, language), detected_mode)
        }),
        RouterIntent::Confirmation => Ok(ChatReply::text(
            match language {
                Language::Fr => "Parfait, c'est confirmé!",
                Language::En => "Great, confirmed!",
            },
            detected_mode,
        )),
        RouterIntent::AddMeal { weekday, meal_type, description } => {
            Ok(handle_add_meal(client, weekday, meal_type, description, context, language).await)
        }
        RouterIntent::AddMealMissingSlot { weekday_missing, meal_type_missing } => {
            Ok(clarification_for_missing_slot(weekday_missing, meal_type_missing, language, detected_mode))
        }
        RouterIntent::ModifyRecipe { target, modification_type, is_question: _ } => {
            Ok(handle_modify_recipe(client, &target.title, message, modification_type, context, language).await)
        }
        RouterIntent::RecipeQa => handle_qa(client, message, history, context, ChatMode::RecipeQa, language).await,
        RouterIntent::NutritionCoach => handle_qa(client, message, history, context, ChatMode::NutritionCoach, language).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;

    use crate::errors::AppError as Error;
    use crate::llm::ChatResponse;
    use crate::models::MealSummary;

    struct StubClient {
        content: String,
    }

    #[async_trait]
    impl LlmClient for StubClient {
        async fn chat_completion(&self, _request: &ChatRequest) -> Result<ChatResponse, Error> {
            Ok(ChatResponse { content: self.content.clone() })
        }
    }

    fn recipe_json() -> String {
        r#"{"title": "Lentil Soup", "servings": 4, "total_minutes": 35,
            "ingredients": [{"name": "lentils", "quantity": 300, "unit": "g", "category": "dry goods"}],
            "steps": ["Rinse the lentils.", "Simmer until tender."], "equipment": [], "tags": []}"#
            .to_owned()
    }

    #[tokio::test]
    async fn non_premium_user_is_rejected() {
        let client = StubClient { content: recipe_json() };
        let context = UserContext { has_premium: false, ..Default::default() };
        let result = handle_turn(&client, "hello", &[], &context, Language::En).await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn plan_display_includes_marker_and_skips_llm_call() {
        let client = StubClient { content: "should not be used".to_owned() };
        let mut context = UserContext { has_premium: true, ..Default::default() };
        context.current_plan.insert(
            Weekday::Mon,
            vec![MealSummary { meal_type: MealType::Dinner, title: "Beef Stew".to_owned(), servings: Some(4), total_minutes: Some(60) }],
        );
        let reply = handle_turn(&client, "show my plan for this week", &[], &context, Language::En).await.unwrap();
        assert!(reply.reply.starts_with("📅 CURRENT PLAN"));
        assert!(reply.reply.contains("Beef Stew"));
    }

    #[tokio::test]
    async fn add_meal_returns_pending_recipe_with_metadata() {
        let client = StubClient { content: recipe_json() };
        let context = UserContext { has_premium: true, ..Default::default() };
        let reply = handle_turn(&client, "add a lentil soup for monday dinner", &[], &context, Language::En).await.unwrap();
        assert_eq!(reply.modification_type, Some(ModificationType::PendingAddMeal));
        assert_eq!(reply.modification_metadata, Some(AddMealMetadata { weekday: Weekday::Mon, meal_type: MealType::Dinner }));
        assert_eq!(reply.modified_recipe.unwrap().title, "Lentil Soup");
    }

    #[tokio::test]
    async fn add_meal_missing_slot_asks_for_clarification() {
        let client = StubClient { content: recipe_json() };
        let context = UserContext { has_premium: true, ..Default::default() };
        let reply = handle_turn(&client, "add something for monday", &[], &context, Language::En).await.unwrap();
        assert!(reply.requires_confirmation);
        assert!(reply.modified_recipe.is_none());
    }

    #[tokio::test]
    async fn nutrition_coach_reply_always_carries_the_disclaimer() {
        let client = StubClient { content: "Eat more vegetables.".to_owned() };
        let context = UserContext { has_premium: true, ..Default::default() };
        let reply = handle_turn(&client, "how many calories should I eat?", &[], &context, Language::En).await.unwrap();
        assert_eq!(reply.detected_mode, ChatMode::NutritionCoach);
        assert!(reply.reply.contains("does not replace professional medical advice"));
    }

    #[tokio::test]
    async fn recipe_qa_reply_uses_recipe_system_prompt_path() {
        let client = StubClient { content: "Use room-temperature butter.".to_owned() };
        let context = UserContext { has_premium: true, ..Default::default() };
        let reply = handle_turn(&client, "how do I substitute butter in this recipe?", &[], &context, Language::En).await.unwrap();
        assert_eq!(reply.detected_mode, ChatMode::RecipeQa);
        assert_eq!(reply.reply, "Use room-temperature butter.");
    }

    #[tokio::test]
    async fn confirmation_turn_acknowledges_without_llm_call() {
        let client = StubClient { content: "unused".to_owned() };
        let context = UserContext { has_premium: true, ..Default::default() };
        let history = vec![ChatTurn { is_from_user: false, content: "Would you like to add it to your plan?".to_owned(), timestamp: Utc::now() }];
        let reply = handle_turn(&client, "yes", &history, &context, Language::En).await.unwrap();
        assert!(reply.reply.contains("confirmed"));
    }
}
