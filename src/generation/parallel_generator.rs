// ABOUTME: Spawns one bounded-concurrency task per slot, collects results back into slot order
// ABOUTME: Cooperative cancellation via a shared watch channel, checked before and during each call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use tokio::sync::{watch, Semaphore};

use crate::llm::adapter::generate_recipe_with_retry;
use crate::llm::LlmClient;
use crate::models::{Language, PlanItem, Slot};

/// Retry budget handed to [`generate_recipe_with_retry`] for every slot.
const MAX_ATTEMPTS: u32 = 3;

/// One slot's worth of generation input: the pre-assembled prompt and
/// the time cap the Slot Scheduler computed for it.
#[derive(Debug, Clone)]
pub struct SlotGenerationRequest {
    /// The slot this prompt targets.
    pub slot: Slot,
    /// Fully assembled prompt text for this slot.
    pub prompt: String,
    /// Time cap to clamp against, if any.
    pub time_cap: Option<u32>,
}

async fn wait_for_cancel(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

fn already_cancelled(rx: Option<&watch::Receiver<bool>>) -> bool {
    rx.is_some_and(|r| *r.borrow())
}

/// Fan out one `GenerateRecipeWithRetry` call per request, bounded to
/// `max_concurrency` concurrent in-flight LLM calls, and return a
/// result vector indexed by original request position (spec.md §4.5).
///
/// A slot whose task observes `cancellation` flip to `true` (either
/// before starting or mid-flight) resolves to `None`; nothing panics
/// and nothing blocks the other slots.
#[must_use]
pub async fn generate_plan(
    client: Arc<dyn LlmClient>,
    requests: Vec<SlotGenerationRequest>,
    language: Language,
    max_concurrency: usize,
    cancellation: Option<watch::Receiver<bool>>,
) -> Vec<Option<PlanItem>> {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let slot_count = requests.len();
    let mut handles = Vec::with_capacity(slot_count);

    for (index, request) in requests.into_iter().enumerate() {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        let mut cancellation = cancellation.clone();

        handles.push(tokio::spawn(async move {
            let Ok(permit) = semaphore.acquire_owned().await else {
                return (index, None);
            };

            if already_cancelled(cancellation.as_ref()) {
                drop(permit);
                return (index, None);
            }

            let recipe_fut =
                generate_recipe_with_retry(client.as_ref(), &request.prompt, request.time_cap, language, MAX_ATTEMPTS);

            let recipe = match cancellation.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        recipe = recipe_fut => Some(recipe),
                        () = wait_for_cancel(rx) => None,
                    }
                }
                None => Some(recipe_fut.await),
            };

            drop(permit);
            (index, recipe.map(|recipe| PlanItem { slot: request.slot, recipe }))
        }));
    }

    let mut results: Vec<Option<PlanItem>> = vec![None; slot_count];
    for handle in handles {
        if let Ok((index, item)) = handle.await {
            results[index] = item;
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::errors::AppError;
    use crate::llm::{ChatRequest, ChatResponse};
    use crate::models::{MealType, Weekday};

    struct CountingClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmClient for CountingClient {
        async fn chat_completion(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ChatResponse {
                content: r#"{"title": "Dish", "servings": 4, "total_minutes": 20,
                    "ingredients": [{"name": "rice", "quantity": 200, "unit": "g", "category": "grains"}],
                    "steps": ["Rinse the rice.", "Simmer until tender."],
                    "equipment": [], "tags": []}"#
                    .to_owned(),
            })
        }
    }

    fn request(weekday: Weekday) -> SlotGenerationRequest {
        SlotGenerationRequest {
            slot: Slot::new(weekday, MealType::Dinner),
            prompt: "generate something".to_owned(),
            time_cap: Some(30),
        }
    }

    #[tokio::test]
    async fn preserves_input_order_despite_unordered_completion() {
        let client: Arc<dyn LlmClient> = Arc::new(CountingClient { calls: AtomicUsize::new(0) });
        let requests = vec![
            request(Weekday::Mon),
            request(Weekday::Tue),
            request(Weekday::Wed),
            request(Weekday::Thu),
        ];
        let results = generate_plan(client, requests, Language::En, 2, None).await;
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().slot.weekday, Weekday::Mon);
        assert_eq!(results[1].as_ref().unwrap().slot.weekday, Weekday::Tue);
        assert_eq!(results[2].as_ref().unwrap().slot.weekday, Weekday::Wed);
        assert_eq!(results[3].as_ref().unwrap().slot.weekday, Weekday::Thu);
        assert!(results.iter().all(Option::is_some));
    }

    #[tokio::test]
    async fn pre_cancelled_token_yields_all_none() {
        let client: Arc<dyn LlmClient> = Arc::new(CountingClient { calls: AtomicUsize::new(0) });
        let requests = vec![request(Weekday::Mon), request(Weekday::Tue)];
        let (tx, rx) = watch::channel(true);
        drop(tx);
        let results = generate_plan(client, requests, Language::En, 4, Some(rx)).await;
        assert!(results.iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn concurrency_cap_of_one_still_completes_every_slot() {
        let client: Arc<dyn LlmClient> = Arc::new(CountingClient { calls: AtomicUsize::new(0) });
        let requests = vec![request(Weekday::Mon), request(Weekday::Tue), request(Weekday::Wed)];
        let results = generate_plan(client, requests, Language::En, 1, None).await;
        assert!(results.iter().all(Option::is_some));
    }
}
