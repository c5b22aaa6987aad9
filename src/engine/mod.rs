// ABOUTME: Orchestration facade wiring the components into the /plan and /meal-prep-kit dataflows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Orchestration Engine
//!
//! Wires the components named in spec.md §2 into the two request
//! dataflows:
//!
//! `/plan`: Slot Scheduler → Protein Distributor → (optional) Deal
//! Source → Parallel Generator [ Prompt Assembler → LLM Client Adapter
//! → Recipe Enricher → Ingredient Matcher ] → ordered response.
//!
//! `/meal-prep-kit`: Slot Scheduler (shelf-life floors) → Protein
//! Distributor (kit rules) → Parallel Generator → Recipe Enricher →
//! Prep Grouper → Phase Synthesizer → kit.
//!
//! This module owns no component's logic; it only sequences calls and
//! threads data between them the way a caller embedding this crate
//! would (spec.md §6 lists the shapes as traits/functions, not an HTTP
//! layer — no transport is built here).

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use crate::concept::generate_concepts;
use crate::deals::{CachedDealSource, DealSource};
use crate::distribution::{distribute_for_kit, distribute_for_plan};
use crate::enrichment::enrich_recipe;
use crate::errors::{AppError, AppResult};
use crate::generation::{generate_plan as generate_plan_items, SlotGenerationRequest};
use crate::llm::adapter::generate_recipe_with_retry;
use crate::llm::LlmClient;
use crate::matching::mark_on_sale;
use crate::models::{
    ComplexityBand, ConceptTheme, Constraints, KitRecipeRef, Language, MealPrepKit, MealType,
    PlanItem, Preferences, Recipe, Slot, UnitSystem, Weekday,
};
use crate::prep::{group_preparation_steps, synthesize_phases};
use crate::prompt::{assemble_recipe_prompt, PromptInputs};
use crate::scheduling::{schedule_kit_slots, schedule_plan_slots, ScheduledSlot};

/// Input to [`plan`] (spec.md §6 `POST /plan`).
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub week_start: NaiveDate,
    pub units: UnitSystem,
    pub slots: Vec<Slot>,
    pub constraints: Constraints,
    pub preferences: Preferences,
    pub language: Language,
}

/// Output of [`plan`].
#[derive(Debug, Clone)]
pub struct PlanResponse {
    pub items: Vec<PlanItem>,
}

const PLAN_SERVINGS: u32 = 4;

async fn resolve_deals<S: DealSource>(
    deal_source: Option<&CachedDealSource<S>>,
    preferences: &Preferences,
) -> Option<HashSet<String>> {
    if preferences.use_weekly_flyers != Some(true) {
        return None;
    }
    let store = preferences.preferred_grocery_store.as_deref().unwrap_or("iga");
    let postal_code = preferences.postal_code.as_deref().unwrap_or("");
    let source = deal_source?;
    source.normalized_deals(store, postal_code).await.ok()
}

fn others_excluding(proteins: &[String], index: usize) -> Vec<String> {
    proteins
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, p)| p.clone())
        .collect()
}

fn requests_for_slots(
    slots: &[Slot],
    scheduled: &[ScheduledSlot],
    proteins: &[String],
    constraints: &Constraints,
    preferences: &Preferences,
    units: UnitSystem,
    concept: Option<&ConceptTheme>,
    language: Language,
) -> Vec<SlotGenerationRequest> {
    slots
        .iter()
        .zip(scheduled.iter())
        .enumerate()
        .map(|(i, (slot, scheduled_slot))| {
            let others = others_excluding(proteins, i);
            let inputs = PromptInputs {
                language,
                meal_type: slot.meal_type,
                unit_system: units,
                servings: PLAN_SERVINGS,
                constraints,
                preferences,
                complexity_band: scheduled_slot.complexity_band,
                time_cap: scheduled_slot.time_cap,
                min_shelf_life_required: scheduled_slot.min_shelf_life_required,
                concept,
                suggested_protein: proteins.get(i).map(String::as_str),
                other_plan_proteins: &others,
                idea: None,
            };
            SlotGenerationRequest {
                slot: *slot,
                prompt: assemble_recipe_prompt(&inputs),
                time_cap: Some(scheduled_slot.time_cap),
            }
        })
        .collect()
}

/// Run the `/plan` dataflow. Every slot that the Parallel Generator
/// did not cancel is enriched, matched against deals when
/// `preferences.use_weekly_flyers` is set, and returned in input
/// order.
pub async fn plan<S: DealSource>(
    client: Arc<dyn LlmClient>,
    deal_source: Option<&CachedDealSource<S>>,
    request: PlanRequest,
    max_concurrency: usize,
) -> PlanResponse {
    let scheduled = schedule_plan_slots(&request.slots, &request.preferences);
    let proteins = distribute_for_plan(&request.slots, &request.preferences);
    let deals = resolve_deals(deal_source, &request.preferences).await;

    let requests = requests_for_slots(
        &request.slots,
        &scheduled,
        &proteins,
        &request.constraints,
        &request.preferences,
        request.units,
        None,
        request.language,
    );

    let results =
        generate_plan_items(client, requests, request.language, max_concurrency, None).await;

    let items = results
        .into_iter()
        .flatten()
        .map(|mut item| {
            enrich_recipe(&mut item.recipe, false, request.language);
            if let Some(deals) = &deals {
                mark_on_sale(&mut item.recipe, deals);
            }
            item
        })
        .collect();

    PlanResponse { items }
}

/// Total prep-time preference bucket for `/meal-prep-kit` (spec.md §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalPrepTimePreference {
    OneHour,
    NinetyMinutes,
    TwoHoursPlus,
}

/// Input to [`meal_prep_kit`] (spec.md §6 `POST /meal-prep-kit`).
#[derive(Debug, Clone)]
pub struct MealPrepKitRequest {
    pub days: Vec<Weekday>,
    pub meals: Vec<MealType>,
    pub servings_per_meal: u32,
    pub total_prep_time_preference: TotalPrepTimePreference,
    pub skill_level: Option<String>,
    pub avoid_rare_ingredients: bool,
    pub prefer_long_shelf_life: bool,
    pub constraints: Constraints,
    pub units: UnitSystem,
    pub language: Language,
    pub selected_concept: Option<ConceptTheme>,
}

fn kit_slots(request: &MealPrepKitRequest) -> AppResult<Vec<Slot>> {
    if request.meals.contains(&MealType::Breakfast) {
        return Err(AppError::input(
            "meals",
            "breakfast is not a supported meal type for meal-prep kits",
        ));
    }
    let mut slots = Vec::with_capacity(request.days.len() * request.meals.len());
    for &weekday in &request.days {
        for &meal_type in &request.meals {
            slots.push(Slot::new(weekday, meal_type));
        }
    }
    Ok(slots)
}

/// Run the `/meal-prep-kit` dataflow.
///
/// # Errors
///
/// Returns [`AppError::Input`] if `request.meals` includes
/// [`MealType::Breakfast`] (spec.md §9 kit meal-type restriction).
pub async fn meal_prep_kit(
    client: Arc<dyn LlmClient>,
    request: MealPrepKitRequest,
    max_concurrency: usize,
) -> AppResult<MealPrepKit> {
    let slots = kit_slots(&request)?;
    let preferences = Preferences::default();

    let scheduled = schedule_kit_slots(&slots, &request.days, &preferences);
    let proteins = distribute_for_kit(slots.len(), &preferences);

    let requests = requests_for_slots(
        &slots,
        &scheduled,
        &proteins,
        &request.constraints,
        &preferences,
        request.units,
        request.selected_concept.as_ref(),
        request.language,
    );

    let results =
        generate_plan_items(client.clone(), requests, request.language, max_concurrency, None)
            .await;

    let kit_recipes: Vec<KitRecipeRef> = results
        .into_iter()
        .zip(scheduled.iter())
        .filter_map(|(item, scheduled_slot)| {
            let mut item = item?;
            enrich_recipe(&mut item.recipe, request.prefer_long_shelf_life, request.language);
            let storage = item.recipe.storage?;
            let _ = scheduled_slot;
            Some(KitRecipeRef {
                storage_note: item.recipe.storage_note.clone().unwrap_or_default(),
                shelf_life_days: storage.shelf_life_days,
                is_freezable: storage.is_freezable,
                slot: item.slot,
                recipe: item.recipe,
            })
        })
        .collect();

    let prep_groups = group_preparation_steps(&kit_recipes, request.language);
    let phases = synthesize_phases(client.as_ref(), &kit_recipes, request.language).await;

    let total_portions = kit_recipes.iter().map(|r| r.recipe.servings).sum();
    let estimated_prep_minutes = kit_recipes.iter().map(|r| r.recipe.total_minutes).sum();

    let (name, description) = match request.language {
        Language::Fr => (
            request
                .selected_concept
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Kit de préparation de repas".to_owned()),
            request
                .selected_concept
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "Repas préparés en lot pour la semaine.".to_owned()),
        ),
        Language::En => (
            request
                .selected_concept
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Meal-Prep Kit".to_owned()),
            request
                .selected_concept
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "Batch-prepared meals for the week.".to_owned()),
        ),
    };

    Ok(MealPrepKit {
        id: Uuid::new_v4(),
        name,
        description,
        total_portions,
        estimated_prep_minutes,
        recipes: kit_recipes,
        prep_groups,
        phases,
        created_at: Utc::now(),
    })
}

/// Input to [`regenerate_meal`] (spec.md §6 `POST /regenerate-meal`).
#[derive(Debug, Clone)]
pub struct RegenerateMealRequest {
    pub slot: Slot,
    pub constraints: Constraints,
    pub preferences: Preferences,
    pub diversity_seed: i64,
    pub language: Language,
}

/// Regenerate a single slot, a thin wrapper around the same
/// Prompt-Assembler → LLM-Client-Adapter → Enricher → Matcher path
/// `/plan` uses, for exactly one [`Slot`] (spec.md §6).
pub async fn regenerate_meal<S: DealSource>(
    client: &dyn LlmClient,
    deal_source: Option<&CachedDealSource<S>>,
    request: RegenerateMealRequest,
) -> Recipe {
    let scheduled = schedule_plan_slots(&[request.slot], &request.preferences);
    let scheduled_slot = scheduled[0];
    let proteins = distribute_for_plan(&[request.slot], &request.preferences);

    let inputs = PromptInputs {
        language: request.language,
        meal_type: request.slot.meal_type,
        unit_system: UnitSystem::Metric,
        servings: PLAN_SERVINGS,
        constraints: &request.constraints,
        preferences: &request.preferences,
        complexity_band: scheduled_slot.complexity_band,
        time_cap: scheduled_slot.time_cap,
        min_shelf_life_required: None,
        concept: None,
        suggested_protein: proteins.first().map(String::as_str),
        other_plan_proteins: &[],
        idea: None,
    };
    let mut prompt = assemble_recipe_prompt(&inputs);
    prompt.push_str(&format!("\n(diversity seed: {})\n", request.diversity_seed));

    let mut recipe =
        generate_recipe_with_retry(client, &prompt, Some(scheduled_slot.time_cap), request.language, 3).await;
    enrich_recipe(&mut recipe, false, request.language);
    if let Some(deals) = resolve_deals(deal_source, &request.preferences).await {
        mark_on_sale(&mut recipe, &deals);
    }
    recipe
}

/// Shared complexity band for the idea/title single-slot paths, which
/// bypass the Slot Scheduler entirely (spec.md §6, §9: the original
/// hardcodes a "medium" band for these endpoints).
const IDEA_COMPLEXITY_BAND: ComplexityBand = ComplexityBand::Medium;
const IDEA_TIME_CAP: u32 = 45;

/// Input shared by [`recipe_from_idea`] and [`recipe_from_title`].
#[derive(Debug, Clone)]
pub struct FreeformRecipeRequest {
    pub text: String,
    pub servings: u32,
    pub units: UnitSystem,
    pub constraints: Constraints,
    pub preferences: Preferences,
    pub language: Language,
}

fn freeform_prompt_inputs(request: &FreeformRecipeRequest) -> PromptInputs<'_> {
    PromptInputs {
        language: request.language,
        meal_type: MealType::Dinner,
        unit_system: request.units,
        servings: request.servings,
        constraints: &request.constraints,
        preferences: &request.preferences,
        complexity_band: IDEA_COMPLEXITY_BAND,
        time_cap: IDEA_TIME_CAP,
        min_shelf_life_required: None,
        concept: None,
        suggested_protein: None,
        other_plan_proteins: &[],
        idea: Some(&request.text),
    }
}

/// `POST /recipe`: generate from a free-text dish idea, bypassing the
/// Slot Scheduler (spec.md §6).
pub async fn recipe_from_idea(client: &dyn LlmClient, request: FreeformRecipeRequest) -> Recipe {
    let inputs = freeform_prompt_inputs(&request);
    let prompt = assemble_recipe_prompt(&inputs);
    generate_recipe_with_retry(client, &prompt, Some(IDEA_TIME_CAP), request.language, 3).await
}

/// `POST /recipe-from-title`: generate from an exact title, which is
/// forced onto the result verbatim regardless of what the LLM
/// returned (spec.md §6: "output: Recipe whose `title` equals the
/// input verbatim").
pub async fn recipe_from_title(client: &dyn LlmClient, request: FreeformRecipeRequest) -> Recipe {
    let title = request.text.clone();
    let inputs = freeform_prompt_inputs(&request);
    let prompt = assemble_recipe_prompt(&inputs);
    let mut recipe =
        generate_recipe_with_retry(client, &prompt, Some(IDEA_TIME_CAP), request.language, 3).await;
    recipe.title = title;
    recipe
}

/// `POST /meal-prep-concepts`: three themed kit concepts for the given
/// constraints (spec.md §6).
pub async fn meal_prep_concepts(
    client: &dyn LlmClient,
    constraints: &Constraints,
    language: Language,
) -> Vec<ConceptTheme> {
    generate_concepts(client, constraints, language).await
}

/// A cooperative-cancellation handle for an in-flight `/plan` or
/// `/meal-prep-kit` request (spec.md §5). Dropping the paired sender
/// leaves every still-running slot task to observe cancellation as if
/// explicitly triggered.
#[must_use]
pub fn cancellation_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}
