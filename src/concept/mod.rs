// ABOUTME: Concept Generator — proposes themed meal-prep-kit concepts via a dedicated LLM call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Concept Generator (spec.md §6 `POST /meal-prep-concepts`): a thin,
//! single-call sibling of [`crate::prep::phase_synthesizer`]. Given
//! [`Constraints`] and a [`Language`], asks the LLM Client Adapter for
//! three [`ConceptTheme`] values and never fails, falling back to a
//! deterministic theme trio on transport or parse failure.

use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::llm::json_extract::decode_json_object;
use crate::llm::{ChatRequest, LlmClient};
use crate::models::{ConceptTheme, Constraints, Language};

#[derive(Debug, Deserialize)]
struct WireConceptTheme {
    name: String,
    description: String,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
}

impl WireConceptTheme {
    fn into_concept_theme(self) -> ConceptTheme {
        ConceptTheme {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            cuisine: self.cuisine,
            tags: self.tags,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireConcepts {
    concepts: Vec<WireConceptTheme>,
}

fn concepts_prompt(constraints: &Constraints, language: Language) -> String {
    let diet = if constraints.diet.is_empty() {
        "none".to_owned()
    } else {
        constraints.diet.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    let evict = if constraints.evict.is_empty() {
        "none".to_owned()
    } else {
        constraints.evict.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    match language {
        Language::Fr => format!(
            "Propose exactement trois concepts thématiques pour un kit de préparation de \
             repas.\nRégimes: {diet}\nIngrédients à éviter: {evict}\n\
             Retourne UNIQUEMENT un objet JSON {{\"concepts\": [{{\"name\", \"description\", \
             \"cuisine\", \"tags\": [...]}}, ...]}} avec exactement trois éléments."
        ),
        Language::En => format!(
            "Propose exactly three themed concepts for a meal-prep kit.\n\
             Diets: {diet}\nIngredients to avoid: {evict}\n\
             Return ONLY a JSON object {{\"concepts\": [{{\"name\", \"description\", \
             \"cuisine\", \"tags\": [...]}}, ...]}} with exactly three elements."
        ),
    }
}

fn fallback_concepts(language: Language) -> Vec<ConceptTheme> {
    let (names, descriptions): (&[&str; 3], &[&str; 3]) = match language {
        Language::Fr => (
            &["Saveurs méditerranéennes", "Confort classique", "Cuisine asiatique légère"],
            &[
                "Huile d'olive, légumes grillés et herbes fraîches.",
                "Des plats réconfortants et familiers, simples à préparer.",
                "Des saveurs sautées, légères et équilibrées.",
            ],
        ),
        Language::En => (
            &["Mediterranean Flavors", "Classic Comfort", "Light Asian-Inspired"],
            &[
                "Olive oil, grilled vegetables, and fresh herbs.",
                "Familiar, comforting dishes that are simple to prepare.",
                "Light, balanced stir-fried flavors.",
            ],
        ),
    };

    names
        .iter()
        .zip(descriptions.iter())
        .map(|(name, description)| ConceptTheme {
            id: Uuid::new_v4(),
            name: (*name).to_owned(),
            description: (*description).to_owned(),
            cuisine: None,
            tags: Vec::new(),
        })
        .collect()
}

/// Generate three meal-prep-kit concept themes for the given
/// constraints. Never fails: a transport or parse error yields
/// [`fallback_concepts`].
#[must_use]
pub async fn generate_concepts(
    client: &dyn LlmClient,
    constraints: &Constraints,
    language: Language,
) -> Vec<ConceptTheme> {
    let system = match language {
        Language::Fr => "Tu es un chef créatif spécialisé en préparation de repas par lots.",
        Language::En => "You are a creative chef specializing in batch meal prep.",
    };
    let user_prompt = concepts_prompt(constraints, language);
    let mut request = ChatRequest::new(system, user_prompt);
    request.temperature = 0.9;
    request.max_tokens = 800;

    let result = async {
        let response = client.chat_completion(&request).await?;
        decode_json_object::<WireConcepts>(&response.content)
    }
    .await;

    match result {
        Ok(wire) if wire.concepts.len() == 3 => {
            wire.concepts.into_iter().map(WireConceptTheme::into_concept_theme).collect()
        }
        Ok(wire) => {
            warn!(count = wire.concepts.len(), "concept generation returned wrong count, using fallback");
            fallback_concepts(language)
        }
        Err(error) => {
            warn!(%error, "concept generation failed, using fallback");
            fallback_concepts(language)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::errors::AppError;
    use crate::llm::ChatResponse;

    struct ScriptedClient {
        responses: Mutex<Vec<Result<String, String>>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Result<String, String>>) -> Self {
            Self { responses: Mutex::new(responses), calls: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn chat_completion(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst);
            let responses = self.responses.lock().unwrap();
            match responses.get(idx) {
                Some(Ok(content)) => Ok(ChatResponse { content: content.clone() }),
                Some(Err(e)) => Err(AppError::Transport(e.clone())),
                None => Err(AppError::Transport("no more scripted responses".to_owned())),
            }
        }
    }

    #[tokio::test]
    async fn returns_three_concepts_from_valid_response() {
        let json = r#"{"concepts": [
            {"name": "A", "description": "da", "cuisine": "fr", "tags": ["x"]},
            {"name": "B", "description": "db", "tags": []},
            {"name": "C", "description": "dc", "tags": []}
        ]}"#;
        let client = ScriptedClient::new(vec![Ok(json.to_owned())]);
        let concepts = generate_concepts(&client, &Constraints::default(), Language::En).await;
        assert_eq!(concepts.len(), 3);
        assert_eq!(concepts[0].name, "A");
    }

    #[tokio::test]
    async fn falls_back_on_parse_failure() {
        let client = ScriptedClient::new(vec![Ok("garbage".to_owned())]);
        let concepts = generate_concepts(&client, &Constraints::default(), Language::Fr).await;
        assert_eq!(concepts.len(), 3);
    }

    #[tokio::test]
    async fn falls_back_on_wrong_count() {
        let json = r#"{"concepts": [{"name": "A", "description": "da", "tags": []}]}"#;
        let client = ScriptedClient::new(vec![Ok(json.to_owned())]);
        let concepts = generate_concepts(&client, &Constraints::default(), Language::En).await;
        assert_eq!(concepts.len(), 3);
    }

    #[tokio::test]
    async fn falls_back_on_transport_error() {
        let client = ScriptedClient::new(vec![Err("boom".to_owned())]);
        let concepts = generate_concepts(&client, &Constraints::default(), Language::En).await;
        assert_eq!(concepts.len(), 3);
    }
}
