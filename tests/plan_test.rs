// ABOUTME: Integration coverage for the /plan dataflow across Scheduler, Distributor, Generator, Enricher, Matcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use async_trait::async_trait;

use mealprep_core::deals::FallbackDealSource;
use mealprep_core::engine::{plan, PlanRequest};
use mealprep_core::errors::AppError;
use mealprep_core::llm::{ChatRequest, ChatResponse, LlmClient};
use mealprep_core::models::{Constraints, Language, MealType, Preferences, Slot, UnitSystem, Weekday};

struct StubClient;

#[async_trait]
impl LlmClient for StubClient {
    async fn chat_completion(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Ok(ChatResponse {
            content: r#"{"title": "Weeknight Chicken Breast Stir-Fry", "servings": 4, "total_minutes": 25,
                "ingredients": [
                    {"name": "chicken breast", "quantity": 500, "unit": "g", "category": "meats"},
                    {"name": "broccoli", "quantity": 300, "unit": "g", "category": "vegetables"}
                ],
                "steps": ["Dice the chicken breast.", "Stir-fry with broccoli until cooked through."],
                "equipment": ["wok"], "tags": ["quick"]}"#
                .to_owned(),
        })
    }
}

fn week_start() -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date")
}

#[tokio::test]
async fn full_week_plan_preserves_order_and_enriches_every_item() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let slots = vec![
        Slot::new(Weekday::Mon, MealType::Dinner),
        Slot::new(Weekday::Tue, MealType::Dinner),
        Slot::new(Weekday::Wed, MealType::Lunch),
        Slot::new(Weekday::Sat, MealType::Breakfast),
    ];
    let request = PlanRequest {
        week_start: week_start(),
        units: UnitSystem::Metric,
        slots: slots.clone(),
        constraints: Constraints::default(),
        preferences: Preferences::default(),
        language: Language::En,
    };

    let response = plan::<FallbackDealSource>(client, None, request, 4).await;

    assert_eq!(response.items.len(), slots.len());
    for (item, slot) in response.items.iter().zip(slots.iter()) {
        assert_eq!(item.slot, *slot);
        assert!(item.recipe.storage.is_some(), "every plan item is enriched");
    }
}

#[tokio::test]
async fn plan_marks_on_sale_ingredients_when_flyers_enabled() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let deal_source = mealprep_core::deals::CachedDealSource::new(FallbackDealSource::new());
    let preferences = Preferences {
        use_weekly_flyers: Some(true),
        preferred_grocery_store: Some("iga".to_owned()),
        postal_code: Some("H2X1A1".to_owned()),
        ..Default::default()
    };
    let request = PlanRequest {
        week_start: week_start(),
        units: UnitSystem::Metric,
        slots: vec![Slot::new(Weekday::Mon, MealType::Dinner)],
        constraints: Constraints::default(),
        preferences,
        language: Language::En,
    };

    let response = plan(client, Some(&deal_source), request, 2).await;

    let recipe = &response.items[0].recipe;
    let chicken = recipe
        .ingredients
        .iter()
        .find(|i| i.name == "chicken breast")
        .expect("recipe contains chicken breast");
    assert!(chicken.on_sale, "chicken breast is in IGA's fallback deal list");
}

#[tokio::test]
async fn plan_respects_allergen_constraints_by_forwarding_them_to_the_prompt() {
    let client: Arc<dyn LlmClient> = Arc::new(StubClient);
    let constraints = Constraints {
        evict: ["peanuts".to_owned()].into_iter().collect(),
        ..Default::default()
    };
    let request = PlanRequest {
        week_start: week_start(),
        units: UnitSystem::Imperial,
        slots: vec![Slot::new(Weekday::Thu, MealType::Dinner)],
        constraints,
        preferences: Preferences::default(),
        language: Language::Fr,
    };

    let response = plan::<FallbackDealSource>(client, None, request, 1).await;

    assert_eq!(response.items.len(), 1);
    let storage_note = response.items[0].recipe.storage_note.as_ref().expect("recipe is enriched");
    assert!(storage_note.contains("frigo"));
}
