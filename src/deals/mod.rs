// ABOUTME: Deal Source — weekly flyer lookups with bilingual normalization and caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deal Source (spec.md §2): supplies the set of ingredient names
//! currently on sale at a given store/postal code, which
//! [`crate::matching::ingredient_matcher`] uses to flag `Recipe.on_sale`.
//!
//! The actual flyer-scraping adapters are out of scope (spec.md §1
//! Non-goals); this module provides the trait boundary, a bilingual
//! synonym expansion, a deterministic fallback source grounded in the
//! original mock server's hardcoded flyer items, and a process-scoped
//! cache keyed by (store, postal code).

pub mod synonyms;

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::errors::AppResult;

/// A single item found on sale at a store, before bilingual expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct DealItem {
    pub name: String,
    pub price: Option<f64>,
    pub discount_percent: Option<u8>,
}

impl DealItem {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: None,
            discount_percent: None,
        }
    }
}

/// Source of weekly grocery deals for a store/postal-code pair
/// (spec.md §6 `DealSource.GetWeeklyDeals(store, postal_code)`).
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn weekly_deals(&self, store: &str, postal_code: &str) -> AppResult<Vec<DealItem>>;
}

/// Deterministic fallback deal list, grounded in the hardcoded
/// `_get_fallback_items` tables of the original flyer scrapers. Used
/// when no live scraping adapter is configured, and never fails.
#[derive(Debug, Default)]
pub struct FallbackDealSource;

impl FallbackDealSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn items_for(store: &str) -> Vec<DealItem> {
        match store.to_ascii_lowercase().as_str() {
            "metro" => vec![
                DealItem {
                    name: "chicken thighs".into(),
                    price: Some(7.99),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "beef steak".into(),
                    price: Some(12.99),
                    discount_percent: Some(15),
                },
                DealItem {
                    name: "tilapia".into(),
                    price: Some(8.49),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "pork tenderloin".into(),
                    price: Some(9.99),
                    discount_percent: Some(25),
                },
                DealItem {
                    name: "zucchini".into(),
                    price: Some(2.49),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "mushrooms".into(),
                    price: Some(2.99),
                    discount_percent: Some(25),
                },
                DealItem {
                    name: "lettuce".into(),
                    price: Some(1.99),
                    discount_percent: Some(15),
                },
                DealItem {
                    name: "cucumber".into(),
                    price: Some(1.49),
                    discount_percent: Some(20),
                },
            ],
            "provigo" => vec![
                DealItem {
                    name: "chicken breast".into(),
                    price: Some(8.49),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "ground beef".into(),
                    price: Some(5.49),
                    discount_percent: Some(15),
                },
                DealItem {
                    name: "salmon".into(),
                    price: Some(10.99),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "broccoli".into(),
                    price: Some(2.79),
                    discount_percent: Some(25),
                },
                DealItem {
                    name: "carrots".into(),
                    price: Some(1.79),
                    discount_percent: Some(20),
                },
            ],
            // "iga" and anything else: IGA's fallback list is the richest
            // in the original and doubles as the generic default.
            _ => vec![
                DealItem {
                    name: "chicken breast".into(),
                    price: Some(8.99),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "salmon".into(),
                    price: Some(9.99),
                    discount_percent: Some(25),
                },
                DealItem {
                    name: "ground beef".into(),
                    price: Some(5.99),
                    discount_percent: Some(15),
                },
                DealItem {
                    name: "pork chops".into(),
                    price: Some(6.99),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "broccoli".into(),
                    price: Some(2.99),
                    discount_percent: Some(30),
                },
                DealItem {
                    name: "carrots".into(),
                    price: Some(1.99),
                    discount_percent: Some(25),
                },
                DealItem {
                    name: "tomatoes".into(),
                    price: Some(3.49),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "potatoes".into(),
                    price: Some(4.99),
                    discount_percent: Some(15),
                },
                DealItem {
                    name: "onions".into(),
                    price: Some(2.49),
                    discount_percent: Some(20),
                },
                DealItem {
                    name: "bell peppers".into(),
                    price: Some(3.99),
                    discount_percent: Some(25),
                },
            ],
        }
    }
}

#[async_trait]
impl DealSource for FallbackDealSource {
    async fn weekly_deals(&self, store: &str, _postal_code: &str) -> AppResult<Vec<DealItem>> {
        Ok(Self::items_for(store))
    }
}

/// Normalize and bilingually expand a batch of deal items into the
/// flat `HashSet<String>` that [`crate::matching::mark_on_sale`]
/// consumes (spec.md §2: "a bilingual synonym expansion (EN↔FR)").
#[must_use]
pub fn normalize_deals(items: &[DealItem]) -> std::collections::HashSet<String> {
    let mut out = std::collections::HashSet::new();
    for item in items {
        let normalized = item.name.trim().to_lowercase();
        if normalized.is_empty() {
            continue;
        }
        synonyms::expand_into(&normalized, &mut out);
    }
    out
}

const CACHE_TTL: Duration = Duration::from_secs(6 * 3600);

struct CacheEntry {
    deals: std::collections::HashSet<String>,
    fetched_at: Instant,
}

/// Process-scoped cache of normalized deal sets keyed by `(store,
/// postal_code)`, safe for concurrent read with single-writer refresh
/// (spec.md §5: "a best-effort in-process cache of deal sets...must be
/// safe for concurrent read and single-writer refresh").
///
/// Wraps any [`DealSource`] and serves cached results for
/// [`CACHE_TTL`] before refreshing from the inner source.
pub struct CachedDealSource<S: DealSource> {
    inner: S,
    cache: RwLock<HashMap<(String, String), CacheEntry>>,
}

impl<S: DealSource> CachedDealSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Normalized, bilingually-expanded deal set for a store/postal
    /// code, refreshing the cache entry if stale or absent.
    pub async fn normalized_deals(
        &self,
        store: &str,
        postal_code: &str,
    ) -> AppResult<std::collections::HashSet<String>> {
        let key = (store.to_owned(), postal_code.to_owned());

        if let Some(entry) = self.cache.read().unwrap_or_else(|e| e.into_inner()).get(&key) {
            if entry.fetched_at.elapsed() < CACHE_TTL {
                return Ok(entry.deals.clone());
            }
        }

        let items = self.inner.weekly_deals(store, postal_code).await?;
        let deals = normalize_deals(&items);

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(
            key,
            CacheEntry {
                deals: deals.clone(),
                fetched_at: Instant::now(),
            },
        );

        Ok(deals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fallback_source_returns_store_specific_items() {
        let source = FallbackDealSource::new();
        let iga = source.weekly_deals("iga", "H2X").await.unwrap();
        let metro = source.weekly_deals("metro", "H2X").await.unwrap();
        assert!(iga.iter().any(|d| d.name == "chicken breast"));
        assert!(metro.iter().any(|d| d.name == "chicken thighs"));
    }

    #[test]
    fn normalize_deals_expands_bilingually() {
        let items = vec![DealItem::new("Chicken Breast"), DealItem::new("salmon")];
        let deals = normalize_deals(&items);
        assert!(deals.contains("chicken breast"));
        assert!(deals.contains("blanc de poulet"));
        assert!(deals.contains("saumon"));
    }

    #[tokio::test]
    async fn cached_source_reuses_entry_within_ttl() {
        let cached = CachedDealSource::new(FallbackDealSource::new());
        let first = cached.normalized_deals("iga", "H2X1A1").await.unwrap();
        let second = cached.normalized_deals("iga", "H2X1A1").await.unwrap();
        assert_eq!(first, second);
        assert!(first.contains("chicken breast"));
    }

    #[tokio::test]
    async fn cache_is_keyed_per_store() {
        let cached = CachedDealSource::new(FallbackDealSource::new());
        let iga = cached.normalized_deals("iga", "H2X1A1").await.unwrap();
        let metro = cached.normalized_deals("metro", "H2X1A1").await.unwrap();
        assert_ne!(iga, metro);
    }
}
