// ABOUTME: Core data model for the meal-prep orchestration engine
// ABOUTME: Ingredient, Recipe, Slot, Preferences, Constraints, MealPrepKit and friends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Model
//!
//! Entities described in spec.md §3. All entities are immutable after
//! construction except [`Ingredient::on_sale`], which the Ingredient
//! Matcher sets exactly once, and [`Recipe::storage`], which the
//! Recipe Enricher fills in exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Output language for prompts and user-visible text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French.
    Fr,
    /// English.
    En,
}

/// Unit system for quantities in generated recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UnitSystem {
    /// Metric (grams, milliliters, Celsius).
    Metric,
    /// Imperial (ounces, cups, Fahrenheit).
    Imperial,
}

/// Day of the week a [`Slot`] falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl Weekday {
    /// All seven weekdays in calendar order, Monday first.
    pub const ORDERED: [Self; 7] = [
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
        Self::Sun,
    ];

    /// `true` for Saturday and Sunday.
    #[must_use]
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Sat | Self::Sun)
    }

    /// Position in [`Self::ORDERED`] (Monday = 0).
    #[must_use]
    pub fn index(self) -> usize {
        Self::ORDERED.iter().position(|d| *d == self).unwrap_or(0)
    }

    /// Localized full day name.
    #[must_use]
    pub const fn localized_name(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Mon, Language::Fr) => "Lundi",
            (Self::Tue, Language::Fr) => "Mardi",
            (Self::Wed, Language::Fr) => "Mercredi",
            (Self::Thu, Language::Fr) => "Jeudi",
            (Self::Fri, Language::Fr) => "Vendredi",
            (Self::Sat, Language::Fr) => "Samedi",
            (Self::Sun, Language::Fr) => "Dimanche",
            (Self::Mon, Language::En) => "Monday",
            (Self::Tue, Language::En) => "Tuesday",
            (Self::Wed, Language::En) => "Wednesday",
            (Self::Thu, Language::En) => "Thursday",
            (Self::Fri, Language::En) => "Friday",
            (Self::Sat, Language::En) => "Saturday",
            (Self::Sun, Language::En) => "Sunday",
        }
    }
}

/// Meal type of a [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    /// Breakfast.
    Breakfast,
    /// Lunch.
    Lunch,
    /// Dinner.
    Dinner,
}

impl MealType {
    /// Localized display label.
    #[must_use]
    pub const fn localized_name(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Breakfast, Language::Fr) => "Déjeuner",
            (Self::Lunch, Language::Fr) => "Dîner",
            (Self::Dinner, Language::Fr) => "Souper",
            (Self::Breakfast, Language::En) => "Breakfast",
            (Self::Lunch, Language::En) => "Lunch",
            (Self::Dinner, Language::En) => "Dinner",
        }
    }
}

/// Complexity band assigned to a slot by the Slot Scheduler (spec.md §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityBand {
    /// Quick, few-ingredient recipes.
    Simple,
    /// One elaborate sauce or garnish, 6-7 ingredients.
    Medium,
    /// Casseroles/braises/baked pasta, 8-10 ingredients.
    Complex,
}

/// A (weekday, meal-type) coordinate in a week plan or kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Day of the week.
    pub weekday: Weekday,
    /// Meal type.
    pub meal_type: MealType,
}

impl Slot {
    /// Construct a new slot.
    #[must_use]
    pub const fn new(weekday: Weekday, meal_type: MealType) -> Self {
        Self { weekday, meal_type }
    }
}

/// One ingredient of a [`Recipe`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (non-empty).
    pub name: String,
    /// Quantity (non-negative).
    pub quantity: f64,
    /// Measurement unit; defaults to `"unit"` / `"unité"` when absent.
    pub unit: String,
    /// Ingredient category; defaults to `"other"` / `"autre"` when absent.
    pub category: String,
    /// Set by the Ingredient Matcher exactly once.
    pub on_sale: bool,
}

impl Ingredient {
    /// Construct an ingredient, filling in the localized defaults for
    /// unit/category when the LLM omitted them.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: Option<String>,
        category: Option<String>,
        language: Language,
    ) -> Self {
        let (default_unit, default_category) = match language {
            Language::Fr => ("unité", "autre"),
            Language::En => ("unit", "other"),
        };
        Self {
            name: name.into(),
            quantity,
            unit: unit.unwrap_or_else(|| default_unit.to_owned()),
            category: category.unwrap_or_else(|| default_category.to_owned()),
            on_sale: false,
        }
    }
}

/// Storage metadata attached to a [`Recipe`] by the Recipe Enricher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageMetadata {
    /// Days the recipe keeps, in `1..=7`.
    pub shelf_life_days: u8,
    /// Whether the recipe freezes well.
    pub is_freezable: bool,
}

/// A generated recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title.
    pub title: String,
    /// Number of servings (positive).
    pub servings: u32,
    /// Total time in minutes; must be `<= ` the caller-supplied cap.
    pub total_minutes: u32,
    /// Ordered ingredients.
    pub ingredients: Vec<Ingredient>,
    /// Ordered step strings; length `>= 5` for a well-formed recipe.
    pub steps: Vec<String>,
    /// Equipment needed.
    pub equipment: Vec<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Storage metadata, filled in by the Recipe Enricher.
    pub storage: Option<StorageMetadata>,
    /// Localized storage note, filled in by the Recipe Enricher.
    pub storage_note: Option<String>,
}

impl Recipe {
    /// Deterministic fallback recipe returned when the LLM Client
    /// Adapter exhausts its retry budget (spec.md §4.4, §4.11). Never
    /// fails.
    #[must_use]
    pub fn fallback(time_cap: Option<u32>, language: Language) -> Self {
        let (title, step1, step2, primary_ingredient) = match language {
            Language::Fr => (
                "Repas simple",
                "Préparer les ingrédients disponibles.",
                "Cuire à feu moyen jusqu'à cuisson complète.",
                "Ingrédient principal",
            ),
            Language::En => (
                "Simple meal",
                "Prepare the available ingredients.",
                "Cook over medium heat until done.",
                "Main ingredient",
            ),
        };
        Self {
            title: title.to_owned(),
            servings: 4,
            total_minutes: time_cap.unwrap_or(30),
            ingredients: vec![Ingredient::new(primary_ingredient, 1.0, None, None, language)],
            steps: vec![step1.to_owned(), step2.to_owned()],
            equipment: Vec::new(),
            tags: vec!["simple".to_owned()],
            storage: None,
            storage_note: None,
        }
    }
}

/// A recipe placed in a [`Slot`] of a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    /// The slot this recipe was generated for.
    pub slot: Slot,
    /// The generated recipe.
    pub recipe: Recipe,
}

/// Recognized, all-optional preference knobs (spec.md §3, §9). Use of
/// `Option` throughout is deliberate: "unset" and "zero" are distinct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Max minutes for a weekday recipe. Defaults to 30 when unset.
    pub weekday_max_minutes: Option<u32>,
    /// Max minutes for a weekend recipe. Defaults to 60 when unset.
    pub weekend_max_minutes: Option<u32>,
    /// Flat max minutes override, if the caller doesn't distinguish
    /// weekday/weekend.
    pub max_minutes: Option<u32>,
    /// Desired spice level, free text (e.g. `"mild"`, `"none"`).
    pub spice_level: Option<String>,
    /// Proteins the user prefers.
    pub preferred_proteins: HashSet<String>,
    /// Appliances available to the user.
    pub available_appliances: HashSet<String>,
    /// Whether meals should be kid-friendly.
    pub kid_friendly: Option<bool>,
    /// Whether to consult weekly flyers (Deal Source).
    pub use_weekly_flyers: Option<bool>,
    /// Postal code, for the Deal Source.
    pub postal_code: Option<String>,
    /// Preferred grocery store, for the Deal Source.
    pub preferred_grocery_store: Option<String>,
}

impl Preferences {
    /// `weekday_max_minutes`, falling back to the spec default of 30.
    #[must_use]
    pub fn weekday_max_minutes_or_default(&self) -> u32 {
        self.weekday_max_minutes.unwrap_or(30)
    }

    /// `weekend_max_minutes`, falling back to the spec default of 60.
    #[must_use]
    pub fn weekend_max_minutes_or_default(&self) -> u32 {
        self.weekend_max_minutes.unwrap_or(60)
    }
}

/// Per-request constraints (spec.md §3). `evict` has absolute priority
/// over every other directive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Dietary regimes to follow (vegetarian, vegan, ...).
    pub diet: HashSet<String>,
    /// Allergens / forbidden ingredients. Absolute priority.
    pub evict: HashSet<String>,
    /// Preferred proteins, as seen by Meal Prep (sent here rather than
    /// in [`Preferences`] by some callers).
    pub preferred_proteins: HashSet<String>,
    /// Free-text user note appended to the prompt.
    pub extra: Option<String>,
    /// Pre-built preference fragment; if present, used verbatim
    /// instead of synthesizing one from [`Preferences`].
    pub preferences_string: Option<String>,
}

/// A recipe bundled into a [`MealPrepKit`] with its storage metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitRecipeRef {
    /// The recipe.
    pub recipe: Recipe,
    /// Shelf life in days. Invariant: `>= target_day_index + 1`.
    pub shelf_life_days: u8,
    /// Whether the recipe freezes well.
    pub is_freezable: bool,
    /// Localized storage note.
    pub storage_note: String,
    /// Slot this recipe was generated for.
    pub slot: Slot,
}

/// Classification bucket for a grouped prep step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// Cutting, dicing, slicing, mincing.
    Cut,
    /// Peeling / skinning.
    Peel,
    /// Grating / shredding.
    Grate,
    /// Mixing, combining, whisking.
    Mix,
    /// Measuring / weighing.
    Measure,
    /// Marinating.
    Marinate,
    /// Preheating the oven.
    Preheat,
}

impl ActionType {
    /// Fixed priority used to order [`GroupedPrepStep`]s: Cut=1 .. Preheat=7.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Cut => 1,
            Self::Peel => 2,
            Self::Grate => 3,
            Self::Mix => 4,
            Self::Measure => 5,
            Self::Marinate => 6,
            Self::Preheat => 7,
        }
    }

    /// Localized imperative label, used to build the group description.
    #[must_use]
    pub const fn localized_label(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Cut, Language::Fr) => "Couper",
            (Self::Peel, Language::Fr) => "Éplucher",
            (Self::Grate, Language::Fr) => "Râper",
            (Self::Mix, Language::Fr) => "Mélanger",
            (Self::Measure, Language::Fr) => "Mesurer",
            (Self::Marinate, Language::Fr) => "Mariner",
            (Self::Preheat, Language::Fr) => "Préchauffer",
            (Self::Cut, Language::En) => "Chop",
            (Self::Peel, Language::En) => "Peel",
            (Self::Grate, Language::En) => "Grate",
            (Self::Mix, Language::En) => "Mix",
            (Self::Measure, Language::En) => "Measure",
            (Self::Marinate, Language::En) => "Marinate",
            (Self::Preheat, Language::En) => "Preheat",
        }
    }
}

/// One ingredient reference inside a [`GroupedPrepStep`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedIngredient {
    /// Ingredient name.
    pub name: String,
    /// Quantity as text (`"{quantity} {unit}"`).
    pub quantity: String,
    /// Title of the recipe this ingredient belongs to.
    pub source_recipe: String,
}

/// A deduplicated, prioritized batch-prep step spanning one or more
/// recipes in a kit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedPrepStep {
    /// The action bucket.
    pub action_type: ActionType,
    /// Localized human-readable description.
    pub description: String,
    /// Ingredients this group covers, each tagged with its source recipe.
    pub ingredients: Vec<GroupedIngredient>,
    /// Raw step text this group was derived from, one per contributing recipe.
    pub detailed_steps: Vec<String>,
    /// Estimated minutes, clamped to `[5, 20]`.
    pub estimated_minutes: u32,
}

/// One step of a [`Phase`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseStep {
    /// Fresh v4 UUID, always re-minted regardless of what the LLM returned.
    pub id: Uuid,
    /// Step description.
    pub description: String,
    /// Title of the recipe this step belongs to, or `"Multiple"`.
    pub recipe_title: String,
    /// Index of the recipe in the kit, if single-recipe.
    pub recipe_index: Option<usize>,
    /// Estimated minutes.
    pub estimated_minutes: u32,
    /// Whether this step runs concurrently with a previous long-running step.
    pub is_parallel: bool,
    /// Name of the covering step, when `is_parallel` is set.
    pub parallel_note: Option<String>,
}

/// One of the four fixed phases of a kit's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Active cooking.
    Cook,
    /// Plating / assembling components.
    Assemble,
    /// Cooling before storage.
    Cool,
    /// Portioning into storage containers.
    Store,
}

impl PhaseKind {
    /// The four phases, always emitted in this order.
    pub const ALL: [Self; 4] = [Self::Cook, Self::Assemble, Self::Cool, Self::Store];

    /// Localized title.
    #[must_use]
    pub const fn localized_title(self, language: Language) -> &'static str {
        match (self, language) {
            (Self::Cook, Language::Fr) => "Cuisson",
            (Self::Assemble, Language::Fr) => "Assemblage",
            (Self::Cool, Language::Fr) => "Refroidissement",
            (Self::Store, Language::Fr) => "Conservation",
            (Self::Cook, Language::En) => "Cook",
            (Self::Assemble, Language::En) => "Assemble",
            (Self::Cool, Language::En) => "Cool",
            (Self::Store, Language::En) => "Store",
        }
    }
}

/// A single phase of a kit's cooking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    /// Which phase this is.
    pub kind: PhaseKind,
    /// Display title.
    pub title: String,
    /// Total minutes: trusted from the LLM if present, else the sum
    /// of its steps' `estimated_minutes`.
    pub total_minutes: u32,
    /// Ordered steps.
    pub steps: Vec<PhaseStep>,
}

/// A batch-cook bundle: several recipes prepared together, plus
/// grouped prep steps and a four-phase cooking plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPrepKit {
    /// Unique kit id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Sum of `recipe.servings` across all recipes.
    pub total_portions: u32,
    /// Sum of `recipe.total_minutes` across all recipes.
    pub estimated_prep_minutes: u32,
    /// Ordered recipe refs.
    pub recipes: Vec<KitRecipeRef>,
    /// Deduplicated, prioritized prep groups.
    pub prep_groups: Vec<GroupedPrepStep>,
    /// The four phases, always Cook/Assemble/Cool/Store in that order.
    pub phases: Vec<Phase>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A themed concept for a meal-prep kit (spec.md §6 `/meal-prep-concepts`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptTheme {
    /// Unique id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Optional cuisine label.
    pub cuisine: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

/// One turn of a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `true` if the user sent this turn, `false` if the assistant did.
    pub is_from_user: bool,
    /// Turn content.
    pub content: String,
    /// When the turn was sent.
    pub timestamp: DateTime<Utc>,
}

/// A short meal summary, as surfaced in `UserContext.current_plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealSummary {
    /// Meal type.
    pub meal_type: MealType,
    /// Recipe title.
    pub title: String,
    /// Servings, if known.
    pub servings: Option<u32>,
    /// Total minutes, if known.
    pub total_minutes: Option<u32>,
}

/// Recipe context surfaced to the Intent Router / Chat Orchestrator:
/// either from the current plan, recent history, or favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    /// Recipe title.
    pub title: String,
    /// Servings, if known.
    pub servings: Option<u32>,
}

/// Client-owned context for a chat turn (spec.md §3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Current plan, keyed by weekday.
    pub current_plan: std::collections::BTreeMap<Weekday, Vec<MealSummary>>,
    /// Recently generated recipes.
    pub recent_recipes: Vec<RecipeRef>,
    /// Favorite recipes.
    pub favorite_recipes: Vec<RecipeRef>,
    /// User preferences.
    pub preferences: Preferences,
    /// Whether the user has a premium subscription.
    pub has_premium: bool,
}

/// The kind of change a mutating chat intent proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationType {
    /// Replace one or more ingredients in an existing recipe.
    ReplaceIngredient,
    /// Adjust the number of servings of an existing recipe.
    AdjustPortions,
    /// Add a brand-new recipe to a plan slot.
    PendingAddMeal,
}

/// A proposed-but-not-yet-applied change, held client-side between a
/// propose turn and the next user turn (spec.md §3, §4.10 state
/// machine). The core never persists this; it only produces and reads
/// it within a single request/response pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingModification {
    /// Title of the original recipe being modified, if any (absent
    /// for a brand-new `pending_add_meal`).
    pub original_recipe_title: Option<String>,
    /// The proposed replacement/new recipe.
    pub proposed_recipe: Recipe,
    /// What kind of change this is.
    pub modification_type: ModificationType,
    /// Target weekday, for `pending_add_meal`.
    pub target_weekday: Option<Weekday>,
    /// Target meal type, for `pending_add_meal`.
    pub target_meal_type: Option<MealType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_index_is_monday_first() {
        assert_eq!(Weekday::Mon.index(), 0);
        assert_eq!(Weekday::Sun.index(), 6);
    }

    #[test]
    fn weekend_detection() {
        assert!(Weekday::Sat.is_weekend());
        assert!(Weekday::Sun.is_weekend());
        assert!(!Weekday::Fri.is_weekend());
    }

    #[test]
    fn ingredient_defaults_are_localized() {
        let en = Ingredient::new("carrot", 2.0, None, None, Language::En);
        assert_eq!(en.unit, "unit");
        assert_eq!(en.category, "other");
        let fr = Ingredient::new("carotte", 2.0, None, None, Language::Fr);
        assert_eq!(fr.unit, "unité");
        assert_eq!(fr.category, "autre");
    }

    #[test]
    fn fallback_recipe_never_fails_and_respects_cap() {
        let r = Recipe::fallback(Some(20), Language::En);
        assert_eq!(r.total_minutes, 20);
        assert!(r.steps.len() >= 2);
        assert_eq!(r.tags, vec!["simple".to_owned()]);
    }

    #[test]
    fn action_type_priority_order() {
        assert!(ActionType::Cut.priority() < ActionType::Peel.priority());
        assert!(ActionType::Marinate.priority() < ActionType::Preheat.priority());
    }
}
