//! Candidate scoring and ranking.
//!
//! Each candidate's embedding is the normalized mean of its
//! representative embeddings. Cosine similarity against the query
//! vector is the base score; candidates clearing the minimum similarity
//! earn a tag-overlap bonus and a price-proximity bonus. Candidates
//! with no resolvable embeddings are floored at the minimum score
//! rather than dropped, so a sparse index degrades ranking quality
//! instead of emptying results.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use shoprec_core::defaults::{MIN_SIMILARITY_SCORE, PRICE_PROXIMITY_WEIGHT};
use shoprec_core::{
    cosine, l2_normalize, FilterSettings, PriceProximitySettings, Product, TagBoostSettings,
    VectorIndex,
};

/// Ranks filtered candidates against a query vector.
pub struct Scorer {
    index: Arc<dyn VectorIndex>,
}

impl Scorer {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }

    /// Score and rank candidates, returning the top `k` with their
    /// final scores rounded to three decimal places.
    pub fn rank(
        &self,
        query: &[f32],
        candidates: Vec<Product>,
        current: Option<&Product>,
        settings: &FilterSettings,
        k: usize,
    ) -> Vec<(Product, f32)> {
        let candidates = hard_price_window(candidates, current, &settings.price_proximity);

        let mut scored: Vec<(Product, f32)> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match self.candidate_vector(&candidate) {
                Some(vector) => {
                    let similarity = cosine(query, &vector);
                    if similarity < MIN_SIMILARITY_SCORE {
                        continue;
                    }
                    let mut score = similarity;
                    if let Some(current) = current {
                        score += tag_boost(current, &candidate, &settings.tag_boost);
                        score +=
                            price_proximity_bonus(current, &candidate, &settings.price_proximity);
                    }
                    scored.push((candidate, score));
                }
                None => {
                    // No embedding evidence: keep at the floor, no bonuses
                    scored.push((candidate, MIN_SIMILARITY_SCORE));
                }
            }
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);
        for entry in &mut scored {
            entry.1 = round3(entry.1);
        }
        scored
    }

    /// Normalized mean of the candidate's representative embeddings.
    fn candidate_vector(&self, product: &Product) -> Option<Vec<f32>> {
        let embeddings: Vec<Vec<f32>> = product
            .representatives
            .iter()
            .filter_map(|rep| self.index.embed(rep))
            .collect();
        if embeddings.is_empty() {
            return None;
        }

        let dims = embeddings[0].len();
        let mut mean = vec![0.0f32; dims];
        let mut counted = 0usize;
        for embedding in &embeddings {
            if embedding.len() != dims {
                continue;
            }
            for (slot, value) in mean.iter_mut().zip(embedding) {
                *slot += value;
            }
            counted += 1;
        }
        if counted == 0 {
            return None;
        }
        for slot in &mut mean {
            *slot /= counted as f32;
        }
        l2_normalize(&mut mean);
        Some(mean)
    }
}

/// Remove candidates priced outside the current product's price window.
///
/// Falls back to the unfiltered list when the window would remove every
/// candidate; this filter alone must never produce zero results.
/// Candidates with unparseable prices stay in the window.
fn hard_price_window(
    candidates: Vec<Product>,
    current: Option<&Product>,
    settings: &PriceProximitySettings,
) -> Vec<Product> {
    if !settings.enabled || settings.range <= 0.0 {
        return candidates;
    }
    let Some(current_price) = current.and_then(Product::price_value) else {
        return candidates;
    };
    if current_price <= 0.0 {
        return candidates;
    }

    let window = settings.range * current_price;
    let filtered: Vec<Product> = candidates
        .iter()
        .filter(|p| match p.price_value() {
            Some(price) => (price - current_price).abs() <= window,
            None => true,
        })
        .cloned()
        .collect();

    if filtered.is_empty() {
        debug!(
            current_price,
            range = settings.range,
            "Price window would remove all candidates, keeping unfiltered list"
        );
        return candidates;
    }
    filtered
}

/// Jaccard-similarity tag bonus, in [0, weight]. Maximal only when the
/// tag sets are identical and non-empty.
fn tag_boost(current: &Product, candidate: &Product, settings: &TagBoostSettings) -> f32 {
    if !settings.enabled {
        return 0.0;
    }
    settings.weight * tag_jaccard(current, candidate)
}

fn tag_jaccard(a: &Product, b: &Product) -> f32 {
    let a_tags: HashSet<String> = a.normalized_tags().into_iter().collect();
    let b_tags: HashSet<String> = b.normalized_tags().into_iter().collect();
    if a_tags.is_empty() || b_tags.is_empty() {
        return 0.0;
    }

    let intersection = a_tags.intersection(&b_tags).count();
    let union = a_tags.union(&b_tags).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f32 / union as f32
}

/// Price-proximity bonus for candidates inside the window, scaled by
/// closeness; zero outside the window or on unparseable prices.
fn price_proximity_bonus(
    current: &Product,
    candidate: &Product,
    settings: &PriceProximitySettings,
) -> f32 {
    if !settings.enabled || settings.range <= 0.0 {
        return 0.0;
    }
    let (Some(current_price), Some(candidate_price)) =
        (current.price_value(), candidate.price_value())
    else {
        return 0.0;
    };
    if current_price <= 0.0 {
        return 0.0;
    }

    let window = settings.range * current_price;
    let diff = (candidate_price - current_price).abs();
    if diff > window || window <= 0.0 {
        return 0.0;
    }
    PRICE_PROXIMITY_WEIGHT * (1.0 - diff / window)
}

fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}
