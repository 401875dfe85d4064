//! Oracle traits implemented by external collaborators.
//!
//! The engine treats the vector index and the text classifier as
//! oracles: synchronous, fast, and allowed to be unavailable. Both
//! kinds of failure are recoverable by contract — an unavailable index
//! means "no embedding evidence", an unavailable classifier means
//! "fall back to keywords". Implementations must be `Send + Sync`;
//! handles are shared across request handlers as `Arc<dyn ...>`.

use crate::error::Result;
use crate::models::Category;

/// Pretrained cross-catalog embedding index.
///
/// Exposes embedding lookup by cross-catalog identifier, top-k
/// similarity search, and popularity-ordered category membership.
pub trait VectorIndex: Send + Sync {
    /// Embedding vector for a cross-catalog product id, or `None` if
    /// the id is unknown to the index.
    fn embed(&self, id: &str) -> Option<Vec<f32>>;

    /// Top-k most similar ids to the query vector, best first, with
    /// inner-product scores.
    fn search(&self, query: &[f32], k: usize) -> Vec<(String, f32)>;

    /// Cross-catalog ids belonging to a category, popularity
    /// descending, at most `limit` entries.
    fn category_members(&self, category: Category, limit: usize) -> Vec<String>;

    /// Whether the index is loaded and usable. Callers degrade to
    /// non-personalized paths when this is false.
    fn is_available(&self) -> bool;

    /// Number of vectors in the index.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Text classifier oracle for category detection.
pub trait CategoryModel: Send + Sync {
    /// Classify combined product text into a category with a
    /// confidence in [0.0, 1.0]. Errors are recoverable: the detector
    /// falls back to keyword scoring.
    fn classify(&self, text: &str) -> Result<(Category, f32)>;
}
