// ABOUTME: Bilingual EN<->FR synonym table for common proteins/vegetables (spec.md §2 Deal Source)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

/// EN<->FR pairs for the items a Quebec grocery flyer is likely to
/// name (spec.md §9 "Stopword and synonym tables": bundled as
/// process-local constants). Grounded in the `INGREDIENT_TRANSLATIONS`
/// table of the original mock server.
const PAIRS: [(&str, &str); 38] = [
    ("chicken", "poulet"),
    ("chicken breast", "blanc de poulet"),
    ("turkey", "dinde"),
    ("turkey breast", "poitrine de dinde"),
    ("beef", "boeuf"),
    ("ground beef", "boeuf haché"),
    ("pork", "porc"),
    ("pork chops", "côtelettes de porc"),
    ("lamb", "agneau"),
    ("fish", "poisson"),
    ("salmon", "saumon"),
    ("tuna", "thon"),
    ("cod", "morue"),
    ("shrimp", "crevettes"),
    ("prawns", "crevettes"),
    ("seafood", "fruits de mer"),
    ("eggs", "oeufs"),
    ("carrots", "carottes"),
    ("broccoli", "brocoli"),
    ("cauliflower", "chou-fleur"),
    ("spinach", "épinards"),
    ("lettuce", "laitue"),
    ("tomatoes", "tomates"),
    ("potatoes", "pommes de terre"),
    ("onions", "oignons"),
    ("garlic", "ail"),
    ("peppers", "poivrons"),
    ("bell peppers", "poivrons"),
    ("mushrooms", "champignons"),
    ("zucchini", "courgettes"),
    ("cucumber", "concombre"),
    ("celery", "céleri"),
    ("asparagus", "asperges"),
    ("green beans", "haricots verts"),
    ("peas", "petits pois"),
    ("corn", "maïs"),
    ("cabbage", "chou"),
    ("tofu", "tofu"),
];

/// Translate a single normalized (lowercase, trimmed) name to its
/// counterpart in the other language. Returns `None` if `name` is not
/// in the table.
#[must_use]
pub fn translate(name: &str) -> Option<&'static str> {
    PAIRS
        .iter()
        .find_map(|(en, fr)| {
            if *en == name {
                Some(*fr)
            } else if *fr == name {
                Some(*en)
            } else {
                None
            }
        })
}

/// Expand one normalized deal name with its bilingual counterpart,
/// inserting both into `out` (spec.md §2: "a bilingual synonym
/// expansion (EN↔FR)").
pub fn expand_into(name: &str, out: &mut HashSet<String>) {
    out.insert(name.to_owned());
    if let Some(translated) = translate(name) {
        out.insert(translated.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_both_directions() {
        assert_eq!(translate("chicken"), Some("poulet"));
        assert_eq!(translate("poulet"), Some("chicken"));
    }

    #[test]
    fn unknown_name_has_no_translation() {
        assert_eq!(translate("quinoa"), None);
    }

    #[test]
    fn expand_inserts_both_languages() {
        let mut set = HashSet::new();
        expand_into("saumon", &mut set);
        assert!(set.contains("saumon"));
        assert!(set.contains("salmon"));
    }
}
