//! Keyword relevance search and hours lookup over the cached directory.

use std::collections::HashSet;
use std::sync::Arc;

use crate::cache::DirectoryCache;
use crate::store::{normalize, HoursRecord, ScoredStore, StoreRecord};

/// Maximum number of stores a search returns.
pub const MAX_RESULTS: usize = 3;

/// Search handle over a shared [`DirectoryCache`].
///
/// Holds no state of its own; every call reads the cache.
pub struct StoreSearch {
    cache: Arc<DirectoryCache>,
}

impl StoreSearch {
    #[must_use]
    pub fn new(cache: Arc<DirectoryCache>) -> Self {
        Self { cache }
    }

    /// Top-scoring stores for a free-text query, at most [`MAX_RESULTS`].
    pub async fn search(&self, query: &str) -> Vec<ScoredStore> {
        let stores = self.cache.fetch_all().await;
        rank_stores(&stores, query)
    }

    /// Opening hours for an exact, case-insensitive store name match.
    pub async fn hours_for(&self, store_name: &str) -> Option<HoursRecord> {
        let stores = self.cache.fetch_all().await;
        hours_for(&stores, store_name)
    }
}

/// Scores every store against the query and returns the top [`MAX_RESULTS`]
/// normalized, in descending relevance order.
///
/// The query is lowercased and split on whitespace into a distinct term set;
/// a store's relevance is the number of terms that occur as substrings of
/// the JSON serialization of its `[name, categories, type]` fields. Stores
/// scoring zero are dropped, and equal scores keep directory order.
#[must_use]
pub fn rank_stores(stores: &[StoreRecord], query: &str) -> Vec<ScoredStore> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &StoreRecord)> = stores
        .iter()
        .filter_map(|store| {
            let score = relevance(store, &terms);
            (score > 0).then_some((score, store))
        })
        .collect();

    // Stable sort: ties keep directory order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(MAX_RESULTS);

    scored
        .into_iter()
        .map(|(relevance, store)| ScoredStore {
            store: normalize(store),
            relevance,
        })
        .collect()
}

/// Opening hours of the first store whose name equals `store_name`
/// case-insensitively, or `None` when no store matches.
#[must_use]
pub fn hours_for(stores: &[StoreRecord], store_name: &str) -> Option<HoursRecord> {
    let wanted = store_name.to_lowercase();
    stores
        .iter()
        .find(|store| store.name.to_lowercase() == wanted)
        .map(|store| store.hours.clone())
}

fn query_terms(query: &str) -> HashSet<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn relevance(store: &StoreRecord, terms: &HashSet<String>) -> usize {
    let blob = search_blob(store);
    terms
        .iter()
        .filter(|term| blob.contains(term.as_str()))
        .count()
}

/// Lowercase JSON rendering of the store's searchable fields, in feed order.
fn search_blob(store: &StoreRecord) -> String {
    serde_json::to_string(&(&store.name, &store.categories, &store.store_type))
        .unwrap_or_default()
        .to_lowercase()
}
