// ABOUTME: Integration coverage for the /meal-prep-kit dataflow across Scheduler, Generator, Grouper, Synthesizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;

use mealprep_core::engine::{meal_prep_concepts, meal_prep_kit, MealPrepKitRequest, TotalPrepTimePreference};
use mealprep_core::errors::AppError;
use mealprep_core::llm::{ChatRequest, ChatResponse, LlmClient};
use mealprep_core::models::{ConceptTheme, Constraints, Language, MealType, PhaseKind, UnitSystem, Weekday};

struct StubClient;

#[async_trait]
impl LlmClient for StubClient {
    async fn chat_completion(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Ok(ChatResponse {
            content: r#"{"title": "Batch Beef Chili", "servings": 4, "total_minutes": 45,
                "ingredients": [
                    {"name": "ground beef", "quantity": 500, "unit": "g", "category": "meats"},
                    {"name": "onions", "quantity": 200, "unit": "g", "category": "vegetables"}
                ],
                "steps": ["Dice the onions.", "Brown the ground beef.", "Simmer the chili for 30 minutes."],
                "equipment": ["pot"], "tags": ["batch"]}"#
                .to_owned(),
        })
    }
}

fn base_request() -> MealPrepKitRequest {
    MealPrepKitRequest {
        // Kept within Thursday (floor 4) since the stub always returns a
        // "ground beef" dish, which the Recipe Enricher classifies as
        // medium-life (max 4 days with `prefer_long_shelf_life`).
        days: vec![Weekday::Mon, Weekday::Wed, Weekday::Thu],
        meals: vec![MealType::Lunch, MealType::Dinner],
        servings_per_meal: 4,
        total_prep_time_preference: TotalPrepTimePreference::NinetyMinutes,
        skill_level: Some("intermediate".to_owned()),
        avoid_rare_ingredients: true,
        prefer_long_shelf_life: true,
        constraints: Constraints::default(),
        units: UnitSystem::Metric,
        language: Language::En,
        selected_concept: None,
    }
}

#[tokio::test]
async fn kit_assembles_six_recipes_with_shelf_life_floors_and_four_phases() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let kit = meal_prep_kit(client, base_request(), 4).await.expect("kit generation succeeds");

    assert_eq!(kit.recipes.len(), 6);
    assert_eq!(kit.phases.len(), 4);
    assert_eq!(
        kit.phases.iter().map(|p| p.kind).collect::<Vec<_>>(),
        vec![PhaseKind::Cook, PhaseKind::Assemble, PhaseKind::Cool, PhaseKind::Store]
    );
    assert_eq!(kit.total_portions, 24);

    for recipe_ref in &kit.recipes {
        let floor = u8::try_from(recipe_ref.slot.weekday.index() + 1).expect("small index");
        assert!(
            recipe_ref.shelf_life_days >= floor,
            "shelf life {} must meet floor {floor} for {:?}",
            recipe_ref.shelf_life_days,
            recipe_ref.slot
        );
    }
}

#[tokio::test]
async fn kit_rejects_breakfast_in_meals() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let mut request = base_request();
    request.meals.push(MealType::Breakfast);

    let result = meal_prep_kit(client, request, 4).await;
    assert!(matches!(result, Err(AppError::Input { field, .. }) if field == "meals"));
}

#[tokio::test]
async fn kit_honors_a_selected_concept_theme_in_its_name_and_description() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let mut request = base_request();
    request.selected_concept = Some(ConceptTheme {
        id: uuid::Uuid::new_v4(),
        name: "Mediterranean Week".to_owned(),
        description: "Olive oil and grilled vegetables all week.".to_owned(),
        cuisine: Some("mediterranean".to_owned()),
        tags: vec!["light".to_owned()],
    });

    let kit = meal_prep_kit(client, request, 4).await.expect("kit generation succeeds");
    assert_eq!(kit.name, "Mediterranean Week");
    assert_eq!(kit.description, "Olive oil and grilled vegetables all week.");
}

#[tokio::test]
async fn meal_prep_concepts_always_returns_exactly_three() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let concepts = meal_prep_concepts(client.as_ref(), &Constraints::default(), Language::Fr).await;
    assert_eq!(concepts.len(), 3);
}
