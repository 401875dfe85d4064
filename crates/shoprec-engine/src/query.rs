//! Weighted query vector construction.
//!
//! Converts a user's behavioral signals into one normalized vector in
//! the embedding space. Each signal's total influence equals its
//! configured weight regardless of how many items contributed: within a
//! signal every resolved embedding carries (signal weight / resolved
//! count). A user with thirty views cannot accidentally outweigh one
//! purchase.
//!
//! Views are the weakest, least-trusted signal, so only the primary
//! representative is looked up for them; the stronger signals use all
//! representatives.

use std::sync::Arc;

use tracing::{debug, warn};

use shoprec_core::{l2_normalize, weighted_mean, Category, SignalBundle, SignalWeights, VectorIndex};

use crate::registry::MerchantRegistry;

/// Builds the personalized query vector for a request.
pub struct QueryVectorBuilder {
    index: Arc<dyn VectorIndex>,
}

impl QueryVectorBuilder {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }

    /// Build the query vector and target category for a request.
    ///
    /// Returns `(None, fallback)` when no signal resolved to any
    /// embedding; callers use the non-personalized path. The target
    /// category comes from the current product when present, else the
    /// first cart item (cart is the strongest non-purchase intent
    /// signal), else the safe default.
    pub fn build(
        &self,
        registry: &MerchantRegistry,
        merchant_id: &str,
        current_product_id: Option<&str>,
        signals: &SignalBundle,
        weights: &SignalWeights,
    ) -> (Option<Vec<f32>>, Category) {
        if !self.index.is_available() {
            warn!(merchant_id, "Vector index unavailable for query vector construction");
            return (None, Category::default());
        }

        let mut primary_category: Option<Category> = None;

        let mut current_vectors = Vec::new();
        let mut purchased_vectors = Vec::new();
        let mut cart_vectors = Vec::new();
        let mut viewed_vectors = Vec::new();

        // 1. Current product: all representatives
        if let Some(current_id) = current_product_id {
            if let Some(product) = registry.product(merchant_id, current_id) {
                primary_category = Some(product.category);
                for rep in &product.representatives {
                    if let Some(embedding) = self.index.embed(rep) {
                        current_vectors.push(embedding);
                    }
                }
            }
        }

        // 2. Past purchases: all representatives per item
        for purchased_id in signals.recent_purchased() {
            if let Some(product) = registry.product(merchant_id, purchased_id) {
                for rep in &product.representatives {
                    if let Some(embedding) = self.index.embed(rep) {
                        purchased_vectors.push(embedding);
                    }
                }
            }
        }

        // 3. Cart items: all representatives, skipping the current product
        for cart_id in signals.recent_cart() {
            if current_product_id == Some(cart_id.as_str()) {
                continue;
            }
            if let Some(product) = registry.product(merchant_id, cart_id) {
                if primary_category.is_none() {
                    primary_category = Some(product.category);
                }
                for rep in &product.representatives {
                    if let Some(embedding) = self.index.embed(rep) {
                        cart_vectors.push(embedding);
                    }
                }
            }
        }

        // 4. Recent views: primary representative only
        for viewed_id in signals.recent_viewed() {
            if current_product_id == Some(viewed_id.as_str()) {
                continue;
            }
            if let Some(product) = registry.product(merchant_id, viewed_id) {
                if let Some(rep) = product.primary_representative() {
                    if let Some(embedding) = self.index.embed(rep) {
                        viewed_vectors.push(embedding);
                    }
                }
            }
        }

        let mut pairs: Vec<(Vec<f32>, f32)> = Vec::new();
        for (vectors, signal_weight) in [
            (current_vectors, weights.current),
            (purchased_vectors, weights.purchased),
            (cart_vectors, weights.cart),
            (viewed_vectors, weights.viewed),
        ] {
            if vectors.is_empty() || signal_weight <= 0.0 {
                continue;
            }
            let per_vector_weight = signal_weight / vectors.len() as f32;
            pairs.extend(vectors.into_iter().map(|v| (v, per_vector_weight)));
        }

        let fallback = primary_category.unwrap_or_default();
        let Some(mut query_vector) = weighted_mean(&pairs) else {
            debug!(merchant_id, "No embeddings resolved for query vector");
            return (None, fallback);
        };

        l2_normalize(&mut query_vector);
        debug!(
            merchant_id,
            embedding_count = pairs.len(),
            target_category = %fallback,
            "Built weighted query vector"
        );

        (Some(query_vector), fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockVectorIndex;
    use shoprec_core::DetectionMethod;
    use shoprec_core::Product;

    fn product(id: &str, category: Category, reps: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            title: String::new(),
            product_type: String::new(),
            tags: Vec::new(),
            price: "10.00".to_string(),
            image: String::new(),
            category,
            category_confidence: 0.5,
            category_method: DetectionMethod::Keywords,
            representatives: reps.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn setup() -> (MerchantRegistry, Arc<MockVectorIndex>) {
        let index = Arc::new(
            MockVectorIndex::new()
                .with_representative("rep-b1", Category::Beauty, vec![1.0, 0.0, 0.0, 0.0])
                .with_representative("rep-b2", Category::Beauty, vec![0.0, 1.0, 0.0, 0.0])
                .with_representative("rep-f1", Category::Fashion, vec![0.0, 0.0, 1.0, 0.0]),
        );
        let registry = MerchantRegistry::new();
        registry.replace(
            "m1",
            vec![
                product("current", Category::Beauty, &["rep-b1", "rep-b2"]),
                product("bought", Category::Beauty, &["rep-b1"]),
                product("carted", Category::Fashion, &["rep-f1"]),
                product("seen", Category::Beauty, &["rep-b2", "rep-b1"]),
            ],
        );
        (registry, index)
    }

    #[test]
    fn test_single_purchase_weight_is_undiluted() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);
        let signals = SignalBundle {
            purchased: vec!["bought".into()],
            ..Default::default()
        };

        let (vector, _) =
            builder.build(&registry, "m1", None, &signals, &SignalWeights::default());
        // One purchased item, one representative: the query vector is
        // exactly that embedding after normalization
        let v = vector.unwrap();
        assert!((v[0] - 1.0).abs() < 1e-6);
        assert!(v[1].abs() < 1e-6);
    }

    #[test]
    fn test_target_category_from_current_product() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);

        let (vector, category) = builder.build(
            &registry,
            "m1",
            Some("current"),
            &SignalBundle::default(),
            &SignalWeights::default(),
        );
        assert!(vector.is_some());
        assert_eq!(category, Category::Beauty);
    }

    #[test]
    fn test_target_category_falls_back_to_first_cart_item() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);
        let signals = SignalBundle {
            added_to_cart: vec!["carted".into()],
            viewed: vec!["seen".into()],
            ..Default::default()
        };

        let (_, category) =
            builder.build(&registry, "m1", None, &signals, &SignalWeights::default());
        assert_eq!(category, Category::Fashion);
    }

    #[test]
    fn test_cart_skips_current_product() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);
        let signals = SignalBundle {
            added_to_cart: vec!["current".into()],
            ..Default::default()
        };

        // The only cart item is the current product, so nothing but the
        // current-product signal contributes
        let (vector, category) = builder.build(
            &registry,
            "m1",
            Some("current"),
            &signals,
            &SignalWeights::default(),
        );
        assert!(vector.is_some());
        assert_eq!(category, Category::Beauty);
    }

    #[test]
    fn test_viewed_uses_primary_representative_only() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);
        let signals = SignalBundle {
            viewed: vec!["seen".into()],
            ..Default::default()
        };

        // "seen" has primary rep-b2 = e2; only that one is used
        let (vector, _) =
            builder.build(&registry, "m1", None, &signals, &SignalWeights::default());
        let v = vector.unwrap();
        assert!(v[0].abs() < 1e-6);
        assert!((v[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_weight_drops_signal() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);
        let signals = SignalBundle {
            viewed: vec!["seen".into()],
            ..Default::default()
        };
        let weights = SignalWeights {
            viewed: 0.0,
            ..Default::default()
        };

        let (vector, _) = builder.build(&registry, "m1", None, &signals, &weights);
        assert!(vector.is_none());
    }

    #[test]
    fn test_purchases_outweigh_views() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);
        let signals = SignalBundle {
            purchased: vec!["bought".into()],
            viewed: vec!["seen".into()],
            ..Default::default()
        };

        let (vector, _) =
            builder.build(&registry, "m1", None, &signals, &SignalWeights::default());
        let v = vector.unwrap();
        // bought -> e1 at weight 0.7, seen -> e2 at weight 0.1
        assert!(v[0] > v[1]);
    }

    #[test]
    fn test_no_resolvable_signals_is_absent() {
        let (registry, index) = setup();
        let builder = QueryVectorBuilder::new(index);

        let (vector, category) = builder.build(
            &registry,
            "m1",
            Some("unknown-product"),
            &SignalBundle::default(),
            &SignalWeights::default(),
        );
        assert!(vector.is_none());
        assert_eq!(category, Category::Home);
    }

    #[test]
    fn test_unavailable_index_is_absent_with_default_category() {
        let (registry, _) = setup();
        let builder = QueryVectorBuilder::new(Arc::new(MockVectorIndex::unavailable()));

        let (vector, category) = builder.build(
            &registry,
            "m1",
            Some("current"),
            &SignalBundle::default(),
            &SignalWeights::default(),
        );
        assert!(vector.is_none());
        assert_eq!(category, Category::Home);
    }
}
