//! Process-local oracle implementations.
//!
//! `FlatIndex` is an in-memory inner-product index over normalized
//! vectors: embeddings are reconstructable by id, search is a full
//! scan, and category membership preserves insertion order as the
//! popularity ordering. It stands in for an externally trained index
//! artifact; an empty index is still "available" and degrades every
//! caller to its no-evidence path.
//!
//! `KeywordCategoryModel` scores the category keyword tables directly,
//! reporting the winning category's share of the total match weight as
//! its confidence.

use std::collections::HashMap;

use tracing::info;

use shoprec_core::{l2_normalize, Category, CategoryModel, Result, VectorIndex};

// =============================================================================
// FLAT INDEX
// =============================================================================

/// In-memory flat vector index.
pub struct FlatIndex {
    embeddings: HashMap<String, Vec<f32>>,
    by_category: HashMap<Category, Vec<String>>,
    order: Vec<String>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self {
            embeddings: HashMap::new(),
            by_category: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert one entry. Vectors are L2-normalized on insert so the
    /// inner product at search time is cosine similarity. Insertion
    /// order within a category is the popularity ordering; callers
    /// insert most-popular first. A duplicate id is ignored, keeping
    /// the first vector.
    pub fn insert(&mut self, id: impl Into<String>, category: Category, mut embedding: Vec<f32>) {
        let id = id.into();
        if self.embeddings.contains_key(&id) {
            return;
        }
        l2_normalize(&mut embedding);
        self.embeddings.insert(id.clone(), embedding);
        self.by_category.entry(category).or_default().push(id.clone());
        self.order.push(id);
    }

    /// Bulk-load entries, logging the resulting size.
    pub fn load(&mut self, entries: Vec<(String, Category, Vec<f32>)>) {
        for (id, category, embedding) in entries {
            self.insert(id, category, embedding);
        }
        info!(entries = self.embeddings.len(), "Vector index loaded");
    }
}

impl Default for FlatIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorIndex for FlatIndex {
    fn embed(&self, id: &str) -> Option<Vec<f32>> {
        self.embeddings.get(id).cloned()
    }

    fn search(&self, query: &[f32], k: usize) -> Vec<(String, f32)> {
        let mut scored: Vec<(String, f32)> = self
            .order
            .iter()
            .filter_map(|id| {
                let embedding = self.embeddings.get(id)?;
                if embedding.len() != query.len() {
                    return None;
                }
                let score: f32 = query.iter().zip(embedding).map(|(a, b)| a * b).sum();
                Some((id.clone(), score))
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    fn category_members(&self, category: Category, limit: usize) -> Vec<String> {
        self.by_category
            .get(&category)
            .map(|ids| ids.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    // An empty index is still available; it answers every lookup with
    // "no evidence" rather than an outage.
    fn is_available(&self) -> bool {
        true
    }

    fn len(&self) -> usize {
        self.embeddings.len()
    }
}

// =============================================================================
// KEYWORD CATEGORY MODEL
// =============================================================================

/// Classifier built directly from the category keyword tables.
///
/// Confidence is the winning category's share of the total matched
/// keyword weight; text matching nothing yields the default category at
/// zero confidence, which the detector treats as sub-threshold.
pub struct KeywordCategoryModel;

impl KeywordCategoryModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeywordCategoryModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryModel for KeywordCategoryModel {
    fn classify(&self, text: &str) -> Result<(Category, f32)> {
        let text = text.to_lowercase();
        let mut total = 0usize;
        let mut best: Option<(Category, usize)> = None;

        for category in Category::ALL {
            let mut score = 0usize;
            for keyword in category.keywords() {
                if text.contains(keyword) {
                    score += keyword.split_whitespace().count();
                }
            }
            total += score;
            if score > 0 && best.map_or(true, |(_, s)| score > s) {
                best = Some((category, score));
            }
        }

        match best {
            Some((category, score)) => Ok((category, score as f32 / total as f32)),
            None => Ok((Category::default(), 0.0)),
        }
    }
}
