//! In-memory test doubles for the oracle collaborators.
//!
//! `MockVectorIndex` and `MockCategoryModel` stand in for the real
//! index and classifier in unit and integration tests. They are part of
//! the public crate so downstream consumers can test against the same
//! traits without a trained artifact on disk.

use std::collections::HashMap;
use std::sync::Mutex;

use shoprec_core::{cosine, Category, CategoryModel, Error, Result, VectorIndex};

/// Scripted vector index built from explicit representative entries.
///
/// Category membership order follows insertion order, which doubles as
/// the popularity ordering in tests.
pub struct MockVectorIndex {
    embeddings: HashMap<String, Vec<f32>>,
    by_category: HashMap<Category, Vec<String>>,
    order: Vec<String>,
    available: bool,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self {
            embeddings: HashMap::new(),
            by_category: HashMap::new(),
            order: Vec::new(),
            available: true,
        }
    }

    /// An index that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Add one representative with its category and embedding.
    pub fn with_representative(
        mut self,
        id: impl Into<String>,
        category: Category,
        embedding: Vec<f32>,
    ) -> Self {
        let id = id.into();
        self.by_category.entry(category).or_default().push(id.clone());
        self.order.push(id.clone());
        self.embeddings.insert(id, embedding);
        self
    }

    /// A deterministic unit vector distinct per category.
    pub fn category_vector(category: Category) -> Vec<f32> {
        let mut v = vec![0.0; Category::ALL.len()];
        let slot = Category::ALL.iter().position(|c| *c == category).unwrap_or(0);
        v[slot] = 1.0;
        v
    }
}

impl Default for MockVectorIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorIndex for MockVectorIndex {
    fn embed(&self, id: &str) -> Option<Vec<f32>> {
        if !self.available {
            return None;
        }
        self.embeddings.get(id).cloned()
    }

    fn search(&self, query: &[f32], k: usize) -> Vec<(String, f32)> {
        if !self.available {
            return Vec::new();
        }
        let mut scored: Vec<(String, f32)> = self
            .order
            .iter()
            .filter_map(|id| {
                self.embeddings.get(id).map(|e| (id.clone(), cosine(query, e)))
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        scored
    }

    fn category_members(&self, category: Category, limit: usize) -> Vec<String> {
        if !self.available {
            return Vec::new();
        }
        self.by_category
            .get(&category)
            .map(|ids| ids.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn len(&self) -> usize {
        self.embeddings.len()
    }
}

enum ModelBehavior {
    Fixed(Category, f32),
    Failing,
    Script(Mutex<Vec<(Category, f32)>>),
}

/// Scripted category classifier.
pub struct MockCategoryModel {
    behavior: ModelBehavior,
}

impl MockCategoryModel {
    /// Always returns the same category and confidence.
    pub fn fixed(category: Category, confidence: f32) -> Self {
        Self {
            behavior: ModelBehavior::Fixed(category, confidence),
        }
    }

    /// Always fails, exercising the keyword fallback.
    pub fn failing() -> Self {
        Self {
            behavior: ModelBehavior::Failing,
        }
    }

    /// Returns the scripted answers in order, then fails.
    pub fn script(answers: Vec<(Category, f32)>) -> Self {
        let mut answers = answers;
        answers.reverse();
        Self {
            behavior: ModelBehavior::Script(Mutex::new(answers)),
        }
    }
}

impl CategoryModel for MockCategoryModel {
    fn classify(&self, _text: &str) -> Result<(Category, f32)> {
        match &self.behavior {
            ModelBehavior::Fixed(category, confidence) => Ok((*category, *confidence)),
            ModelBehavior::Failing => Err(Error::Classifier("mock classifier failure".into())),
            ModelBehavior::Script(answers) => {
                let mut answers = match answers.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                answers
                    .pop()
                    .ok_or_else(|| Error::Classifier("mock script exhausted".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_orders_by_similarity() {
        let index = MockVectorIndex::new()
            .with_representative("near", Category::Beauty, vec![1.0, 0.0])
            .with_representative("far", Category::Beauty, vec![0.0, 1.0])
            .with_representative("mid", Category::Beauty, vec![0.7, 0.7]);

        let hits = index.search(&[1.0, 0.0], 2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, "near");
        assert_eq!(hits[1].0, "mid");
    }

    #[test]
    fn test_unavailable_index_returns_nothing() {
        let index = MockVectorIndex::unavailable();
        assert!(!index.is_available());
        assert!(index.embed("x").is_none());
        assert!(index.search(&[1.0], 5).is_empty());
        assert!(index.category_members(Category::Home, 5).is_empty());
    }

    #[test]
    fn test_script_model_exhausts_then_fails() {
        let model = MockCategoryModel::script(vec![(Category::Beauty, 0.9)]);
        assert!(model.classify("first").is_ok());
        assert!(model.classify("second").is_err());
    }
}
