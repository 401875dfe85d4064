//! Category representative resolution.
//!
//! Merchant products do not exist in the pretrained embedding space, so
//! each category is stood in for by a small set of cross-catalog
//! identifiers fetched from the index in popularity order. The full
//! fetch (up to 100 ids) is cached per category for the process
//! lifetime; callers slice to their own limit. An unavailable index
//! degrades to an empty list — "no embedding evidence", not an error.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use shoprec_core::defaults::REPRESENTATIVE_FETCH_LIMIT;
use shoprec_core::{Category, VectorIndex};

/// Process-wide representative cache over the vector index oracle.
pub struct RepresentativeResolver {
    index: Arc<dyn VectorIndex>,
    cache: RwLock<HashMap<Category, Vec<String>>>,
}

impl RepresentativeResolver {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self {
            index,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Popularity-ordered representative ids for a category, at most
    /// `limit` entries.
    ///
    /// Cache population races are resolved last-writer-wins; duplicate
    /// population is harmless because the fetch is deterministic for an
    /// unchanged index.
    pub fn representatives(&self, category: Category, limit: usize) -> Vec<String> {
        {
            let cache = read_lock(&self.cache);
            if let Some(cached) = cache.get(&category) {
                return cached.iter().take(limit).cloned().collect();
            }
        }

        if !self.index.is_available() {
            warn!(category = %category, "Vector index unavailable, returning empty representatives");
            return Vec::new();
        }

        let full = self.index.category_members(category, REPRESENTATIVE_FETCH_LIMIT);
        debug!(category = %category, count = full.len(), "Cached category representatives");

        let mut cache = write_lock(&self.cache);
        cache.insert(category, full.clone());

        full.into_iter().take(limit).collect()
    }

    /// Whether a category has already been cached (test/introspection).
    pub fn is_cached(&self, category: Category) -> bool {
        read_lock(&self.cache).contains_key(&category)
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
