// ABOUTME: Composes the fixed-order LLM user prompt for single-recipe generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::{ComplexityBand, ConceptTheme, Constraints, Language, MealType, Preferences, UnitSystem};

/// Everything the Prompt Assembler needs to build one recipe prompt.
/// Pure data; the assembler makes no I/O and consults no clock.
#[derive(Debug, Clone)]
pub struct PromptInputs<'a> {
    /// Output language.
    pub language: Language,
    /// Meal type of the slot being generated.
    pub meal_type: MealType,
    /// Unit system for quantities.
    pub unit_system: UnitSystem,
    /// Number of servings.
    pub servings: u32,
    /// Request constraints (allergens, diet, preferred proteins, free text).
    pub constraints: &'a Constraints,
    /// Request preferences.
    pub preferences: &'a Preferences,
    /// Complexity band derived by the Slot Scheduler.
    pub complexity_band: ComplexityBand,
    /// Time cap in minutes derived by the Slot Scheduler.
    pub time_cap: u32,
    /// Minimum shelf life in days required, if this is a kit recipe.
    pub min_shelf_life_required: Option<u8>,
    /// Concept theme, if the caller selected one.
    pub concept: Option<&'a ConceptTheme>,
    /// Protein the Distributor suggests for this slot.
    pub suggested_protein: Option<&'a str>,
    /// Proteins assigned to other slots in the same plan/kit (forbidden here).
    pub other_plan_proteins: &'a [String],
    /// Free-text dish idea/description seeding the request (e.g. the
    /// `/recipe` endpoint's `idea` field, or a chat add-meal request
    /// with add-verbs and date tokens stripped).
    pub idea: Option<&'a str>,
}

fn meal_type_label(meal_type: MealType, language: Language) -> &'static str {
    match (meal_type, language) {
        (MealType::Breakfast, Language::Fr) => "petit-déjeuner",
        (MealType::Lunch, Language::Fr) => "dîner",
        (MealType::Dinner, Language::Fr) => "souper",
        (MealType::Breakfast, Language::En) => "breakfast",
        (MealType::Lunch, Language::En) => "lunch",
        (MealType::Dinner, Language::En) => "dinner",
    }
}

fn allergen_block(constraints: &Constraints, language: Language) -> String {
    if constraints.evict.is_empty() {
        return String::new();
    }
    let mut evict: Vec<&str> = constraints.evict.iter().map(String::as_str).collect();
    evict.sort_unstable();
    let list = evict.join(", ");
    match language {
        Language::Fr => format!(
            "🚨 RESTRICTIONS ALIMENTAIRES CRITIQUES - INTERDICTIONS ABSOLUES 🚨\n\
             Tu es STRICTEMENT INTERDIT d'utiliser ces ingrédients: {list}\n\
             N'utilise AUCUN de ces ingrédients sous quelque forme que ce soit, ni aucun \
             substitut similaire. Cette règle est absolue et non négociable.\n\n"
        ),
        Language::En => format!(
            "🚨 CRITICAL DIETARY RESTRICTIONS - ABSOLUTE PROHIBITIONS 🚨\n\
             You are STRICTLY FORBIDDEN from using these ingredients: {list}\n\
             Do NOT use any of these ingredients in any form, nor any similar substitute. \
             This rule is absolute and non-negotiable.\n\n"
        ),
    }
}

fn diet_block(constraints: &Constraints, language: Language) -> String {
    if constraints.diet.is_empty() {
        return String::new();
    }
    let mut diets: Vec<&str> = constraints.diet.iter().map(String::as_str).collect();
    diets.sort_unstable();
    let list = diets.join(", ");
    match language {
        Language::Fr => format!("Régimes alimentaires à respecter: {list}\n"),
        Language::En => format!("Dietary requirements to follow: {list}\n"),
    }
}

fn complexity_block(band: ComplexityBand, time_cap: u32, language: Language) -> String {
    match (band, language) {
        (ComplexityBand::Simple, Language::Fr) => format!(
            "RECETTE SIMPLE et RAPIDE (max {time_cap} minutes):\n\
             - Techniques basiques: grillé, poêlé, sauté, rôti, vapeur\n\
             - Formats acceptés: protéine + légumes, salades composées, omelettes\n\
             - Minimum 5 ingrédients.\n"
        ),
        (ComplexityBand::Simple, Language::En) => format!(
            "SIMPLE and QUICK recipe (max {time_cap} minutes):\n\
             - Basic techniques: grilled, pan-fried, sautéed, roasted, steamed\n\
             - Accepted formats: protein + vegetables, composed salads, omelets\n\
             - Minimum 5 ingredients.\n"
        ),
        (ComplexityBand::Medium, Language::Fr) => format!(
            "RECETTE DE COMPLEXITÉ MOYENNE (max {time_cap} minutes):\n\
             - Inclure UNE sauce ou garniture élaborée\n\
             - Formats privilégiés: pâtes avec sauce, sautés asiatiques, bowls composés\n\
             - Minimum 6-7 ingrédients différents.\n"
        ),
        (ComplexityBand::Medium, Language::En) => format!(
            "MEDIUM COMPLEXITY recipe (max {time_cap} minutes):\n\
             - Include ONE elaborate sauce or garnish\n\
             - Preferred formats: pasta with sauce, Asian stir-fries, composed bowls\n\
             - Minimum 6-7 different ingredients.\n"
        ),
        (ComplexityBand::Complex, Language::Fr) => format!(
            "RECETTE ÉLABORÉE (max {time_cap} minutes):\n\
             - Privilégier: casseroles, lasagnes, gratins, plats mijotés, pâtes au four\n\
             - Sauces riches: béchamel, sauce tomate maison, crème réduite\n\
             - Minimum 8-10 ingrédients variés incluant herbes, épices, condiments.\n"
        ),
        (ComplexityBand::Complex, Language::En) => format!(
            "ELABORATE recipe (max {time_cap} minutes):\n\
             - Prioritize: casseroles, lasagnas, gratins, braised dishes, baked pasta\n\
             - Rich sauces: béchamel, homemade tomato sauce, reduced cream\n\
             - Minimum 8-10 varied ingredients including herbs, spices, condiments.\n"
        ),
    }
}

fn idea_block(idea: Option<&str>, language: Language) -> String {
    let Some(idea) = idea.filter(|i| !i.trim().is_empty()) else {
        return String::new();
    };
    match language {
        Language::Fr => format!("Idée de plat demandée par l'utilisateur: {idea}\n\n"),
        Language::En => format!("Dish idea requested by the user: {idea}\n\n"),
    }
}

fn extra_note_block(constraints: &Constraints, language: Language) -> String {
    let Some(note) = constraints.extra.as_deref().filter(|n| !n.trim().is_empty()) else {
        return String::new();
    };
    match language {
        Language::Fr => format!("Note additionnelle de l'utilisateur: {note}\n"),
        Language::En => format!("Additional user note: {note}\n"),
    }
}

fn preference_fragment(
    constraints: &Constraints,
    preferences: &Preferences,
    language: Language,
) -> String {
    if let Some(verbatim) = &constraints.preferences_string {
        return verbatim.clone();
    }
    let mut out = String::new();
    if let Some(spice) = &preferences.spice_level {
        if spice != "none" {
            match language {
                Language::Fr => out.push_str(&format!("Niveau d'épices: {spice}. ")),
                Language::En => out.push_str(&format!("Spice level: {spice}. ")),
            }
        }
    }
    if !preferences.preferred_proteins.is_empty() {
        let mut proteins: Vec<&str> =
            preferences.preferred_proteins.iter().map(String::as_str).collect();
        proteins.sort_unstable();
        let list = proteins.join(", ");
        match language {
            Language::Fr => out.push_str(&format!("Protéines préférées: {list}. ")),
            Language::En => out.push_str(&format!("Preferred proteins: {list}. ")),
        }
    }
    if !preferences.available_appliances.is_empty() {
        let mut appliances: Vec<&str> =
            preferences.available_appliances.iter().map(String::as_str).collect();
        appliances.sort_unstable();
        let list = appliances.join(", ");
        match language {
            Language::Fr => out.push_str(&format!("Équipement disponible: {list}. ")),
            Language::En => out.push_str(&format!("Available cooking equipment: {list}. ")),
        }
    }
    if preferences.kid_friendly == Some(true) {
        match language {
            Language::Fr => out.push_str("Repas adaptés aux enfants. "),
            Language::En => out.push_str("Kid-friendly meals preferred. "),
        }
    }
    out
}

fn preferred_protein_override(
    constraints: &Constraints,
    preference_fragment: &str,
    language: Language,
) -> String {
    if constraints.preferred_proteins.is_empty() {
        return String::new();
    }
    let already_present = preference_fragment.contains("Preferred proteins")
        || preference_fragment.contains("Protéines préférées");
    if already_present {
        return String::new();
    }
    let mut proteins: Vec<&str> =
        constraints.preferred_proteins.iter().map(String::as_str).collect();
    proteins.sort_unstable();
    let list = proteins.join(", ");
    match language {
        Language::Fr => {
            format!("CRITIQUE - PROTÉINES PRÉFÉRÉES DE L'UTILISATEUR: {list}. TU DOIS UTILISER UNIQUEMENT CES PROTÉINES. ")
        }
        Language::En => {
            format!("CRITICAL - USER'S PREFERRED PROTEINS: {list}. YOU MUST ONLY USE THESE PROTEINS. ")
        }
    }
}

fn protein_portions_table(language: Language) -> &'static str {
    match language {
        Language::Fr => {
            "\nCRITIQUE - PORTIONS DE PROTÉINES PAR PERSONNE:\n\
             - Poulet (poitrine, cuisse): 150-200g par personne\n\
             - Bœuf (steak, rôti): 180-220g par personne\n\
             - Porc (côtelettes, filet): 160-200g par personne\n\
             - Agneau: 180-200g par personne\n\
             - Poisson (filet): 150-180g par personne\n\
             - Crevettes: 120-150g par personne\n\
             - Tofu: 120-150g par personne\n\
             - Tempeh/Seitan: 100-130g par personne\n\
             - Œufs: 2-3 gros œufs par personne\n\
             - Viande hachée: 150-180g par personne\n"
        }
        Language::En => {
            "\nCRITICAL - PROTEIN PORTIONS PER PERSON:\n\
             - Chicken (breast, thigh): 150-200g per person\n\
             - Beef (steak, roast): 180-220g per person\n\
             - Pork (chops, tenderloin): 160-200g per person\n\
             - Lamb: 180-200g per person\n\
             - Fish (fillet): 150-180g per person\n\
             - Shrimp: 120-150g per person\n\
             - Tofu: 120-150g per person\n\
             - Tempeh/Seitan: 100-130g per person\n\
             - Eggs: 2-3 large eggs per person\n\
             - Ground meat: 150-180g per person\n"
        }
    }
}

fn storage_instructions(min_shelf_life_required: Option<u8>, language: Language) -> String {
    let Some(days) = min_shelf_life_required else {
        return String::new();
    };
    if days < 4 {
        return String::new();
    }
    match language {
        Language::Fr => format!(
            "\n🥡 CONSERVATION ADAPTATIVE (CRITIQUE):\n\
             Cette recette sera consommée le jour {days} après préparation. Elle DOIT se \
             conserver {days} jours au frigo, OU être congelable.\n\
             Privilégier: soupes, ragoûts, chilis, plats mijotés, casseroles, lasagnes, \
             gratins, pâtes au four.\n\
             Éviter: salades, poisson frais, fruits de mer non congelés.\n"
        ),
        Language::En => format!(
            "\n🥡 ADAPTIVE STORAGE (CRITICAL):\n\
             This recipe will be consumed on day {days} after preparation. It MUST keep \
             {days} days in fridge, OR be freezable.\n\
             Prioritize: soups, stews, chilis, braised dishes, casseroles, lasagnas, \
             gratins, baked pasta.\n\
             Avoid: salads, fresh fish, non-frozen seafood.\n"
        ),
    }
}

fn concept_block(concept: Option<&ConceptTheme>, language: Language) -> String {
    let Some(concept) = concept else {
        return String::new();
    };
    match language {
        Language::Fr => format!(
            "\n🎨 THÈME CULINAIRE: {}: {}\nInspire-toi de ce thème pour créer la recette.\n",
            concept.name, concept.description
        ),
        Language::En => format!(
            "\n🎨 CULINARY THEME: {}: {}\nDraw inspiration from this theme.\n",
            concept.name, concept.description
        ),
    }
}

fn diversity_block(
    suggested_protein: Option<&str>,
    other_plan_proteins: &[String],
    language: Language,
) -> String {
    let mut out = match language {
        Language::Fr => String::from(
            "\n🎯 IMPÉRATIF - DIVERSITÉ DES TYPES DE PLATS:\n\
             Varie les formats: plats simples grillés, plats en sauce, plats au four, plats \
             mijotés, pâtes/riz, plats internationaux.\n",
        ),
        Language::En => String::from(
            "\nCRITICAL - MAXIMUM DIVERSITY:\n\
             Vary formats: simple grilled dishes, saucy dishes, baked dishes, braised \
             dishes, pasta/rice, international dishes.\n",
        ),
    };
    if let Some(protein) = suggested_protein {
        if !other_plan_proteins.is_empty() {
            let forbidden = other_plan_proteins.join(", ");
            match language {
                Language::Fr => {
                    out.push_str(&format!("PROTÉINE SUGGÉRÉE: {protein}\n"));
                    out.push_str(&format!("INTERDICTION d'utiliser: {forbidden}\n"));
                }
                Language::En => {
                    out.push_str(&format!("SUGGESTED PROTEIN: {protein}\n"));
                    out.push_str(&format!("FORBIDDEN to use these proteins (already in plan): {forbidden}\n"));
                }
            }
        }
    }
    out
}

fn preparation_step_directive(language: Language) -> &'static str {
    match language {
        Language::Fr => {
            "\nCRITIQUE - ÉTAPES DE PRÉPARATION: La recette DOIT commencer par des étapes de \
             préparation détaillées nommant les coupes et quantités précises (ex: \"couper \
             les carottes en dés de 1cm\"), avant les étapes de cuisson.\n"
        }
        Language::En => {
            "\nCRITICAL - PREPARATION STEPS: The recipe MUST start with detailed preparation \
             steps naming exact cuts and quantities (e.g. \"dice carrots into 1cm cubes\"), \
             before any cooking steps.\n"
        }
    }
}

fn temperature_format_directive(language: Language) -> &'static str {
    match language {
        Language::Fr => "Chaque température doit être rendue comme \"X°C (Y°F)\".\n",
        Language::En => "Every temperature must be rendered as \"X°C (Y°F)\".\n",
    }
}

fn structured_output_schema(servings: u32, language: Language) -> String {
    match language {
        Language::Fr => format!(
            "Retourne UNIQUEMENT un objet JSON valide avec cette structure exacte (sans \
             texte avant ou après):\n\
             {{\n  \"title\": \"Nom créatif de la recette\",\n  \"servings\": {servings},\n  \
             \"total_minutes\": 30,\n  \"ingredients\": [{{\"name\": \"ingrédient\", \
             \"quantity\": 200, \"unit\": \"g\", \"category\": \"légumes\"}}],\n  \"steps\": \
             [\"Préparation: ...\", \"Cuisson: ...\"],\n  \"equipment\": [\"poêle\"],\n  \
             \"tags\": [\"facile\"]\n}}\n"
        ),
        Language::En => format!(
            "Return ONLY a valid JSON object with this exact structure (no text before or \
             after):\n\
             {{\n  \"title\": \"Creative recipe name\",\n  \"servings\": {servings},\n  \
             \"total_minutes\": 30,\n  \"ingredients\": [{{\"name\": \"ingredient\", \
             \"quantity\": 200, \"unit\": \"g\", \"category\": \"vegetables\"}}],\n  \"steps\": \
             [\"Prep: ...\", \"Cook: ...\"],\n  \"equipment\": [\"pan\"],\n  \"tags\": \
             [\"easy\"]\n}}\n"
        ),
    }
}

fn unit_and_category_enumeration(unit_system: UnitSystem, language: Language) -> String {
    let unit_label = match (unit_system, language) {
        (UnitSystem::Metric, Language::Fr) => "métrique (grammes, ml)",
        (UnitSystem::Imperial, Language::Fr) => "impérial (oz, cups)",
        (UnitSystem::Metric, Language::En) => "metric (grams, ml)",
        (UnitSystem::Imperial, Language::En) => "imperial (oz, cups)",
    };
    match language {
        Language::Fr => format!(
            "Utilise le système {unit_label}.\nCatégories d'ingrédients possibles: légumes, \
             fruits, viandes, poissons, produits laitiers, sec, condiments, conserves.\n"
        ),
        Language::En => format!(
            "Use the {unit_label} system.\nPossible ingredient categories: vegetables, \
             fruits, meats, fish, dairy, dry goods, condiments, canned goods.\n"
        ),
    }
}

/// Assemble the full user prompt for a single recipe generation call.
///
/// Pure: identical `inputs` always produce a byte-identical string
/// (spec.md §4.2 contract). Section order is fixed and the allergen
/// block, when present, is always the first constraint section.
#[must_use]
pub fn assemble_recipe_prompt(inputs: &PromptInputs<'_>) -> String {
    let meal_label = meal_type_label(inputs.meal_type, inputs.language);
    let preference_fragment = preference_fragment(inputs.constraints, inputs.preferences, inputs.language);
    let protein_override =
        preferred_protein_override(inputs.constraints, &preference_fragment, inputs.language);

    let header = match inputs.language {
        Language::Fr => format!(
            "Génère une recette de {meal_label} en français pour {} personnes.\n\n",
            inputs.servings
        ),
        Language::En => format!(
            "Generate a {meal_label} recipe in English for {} people.\n\n",
            inputs.servings
        ),
    };

    let mut prompt = String::new();
    prompt.push_str(&header);
    prompt.push_str(&idea_block(inputs.idea, inputs.language));
    prompt.push_str(&allergen_block(inputs.constraints, inputs.language));
    prompt.push_str(&diet_block(inputs.constraints, inputs.language));
    prompt.push_str(&complexity_block(inputs.complexity_band, inputs.time_cap, inputs.language));
    prompt.push('\n');
    prompt.push_str(&preference_fragment);
    prompt.push_str(&protein_override);
    prompt.push_str(&extra_note_block(inputs.constraints, inputs.language));
    prompt.push_str(protein_portions_table(inputs.language));
    prompt.push_str(&storage_instructions(inputs.min_shelf_life_required, inputs.language));
    prompt.push_str(&concept_block(inputs.concept, inputs.language));
    prompt.push_str(&diversity_block(
        inputs.suggested_protein,
        inputs.other_plan_proteins,
        inputs.language,
    ));
    prompt.push_str(preparation_step_directive(inputs.language));
    prompt.push_str(temperature_format_directive(inputs.language));
    prompt.push_str(&structured_output_schema(inputs.servings, inputs.language));
    prompt.push_str(&unit_and_category_enumeration(inputs.unit_system, inputs.language));
    prompt
}
