//! Recommendation orchestration.
//!
//! `Recommender` wires the registry, detector, resolver, query builder,
//! and scorer into the registration and recommendation operations. All
//! collaborators are constructed explicitly and injected at startup;
//! request handlers hold the service by `Arc`, never through globals.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use shoprec_core::defaults::{DEFAULT_K, MAX_K, REPS_PER_PRODUCT};
use shoprec_core::{
    Category, CategoryModel, Error, MerchantSettings, Product, ProductInput, Recommendation,
    Result, SignalBundle, UserPreferences, VectorIndex,
};

use crate::detector::CategoryDetector;
use crate::filters::{apply_all_filters, exclude_products};
use crate::query::QueryVectorBuilder;
use crate::registry::{MerchantRegistry, RegistrationSummary};
use crate::representatives::RepresentativeResolver;
use crate::scorer::Scorer;

const REASON_PURCHASES: &str = "Based on your purchase history";
const REASON_CURRENT: &str = "Similar to the item you're viewing";
const REASON_VIEWS: &str = "Based on your recently viewed items";
const REASON_POPULAR: &str = "Popular in this category";

fn default_true() -> bool {
    true
}

/// One recommendation request, normalized at the boundary.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecommendRequest {
    pub merchant_id: String,
    /// Product the shopper is currently viewing; absent in homepage
    /// mode, where candidates come from the whole catalog.
    #[serde(default)]
    pub current_product_id: Option<String>,
    #[serde(default)]
    pub signals: SignalBundle,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default = "RecommendRequest::default_k")]
    pub k: usize,
    #[serde(default = "default_true")]
    pub exclude_current: bool,
    #[serde(default)]
    pub exclude_viewed: bool,
    #[serde(default = "default_true")]
    pub exclude_purchased: bool,
    #[serde(default)]
    pub settings: MerchantSettings,
}

impl RecommendRequest {
    fn default_k() -> usize {
        DEFAULT_K
    }

    pub fn for_merchant(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            current_product_id: None,
            signals: SignalBundle::default(),
            location: None,
            preferences: UserPreferences::default(),
            k: DEFAULT_K,
            exclude_current: true,
            exclude_viewed: false,
            exclude_purchased: true,
            settings: MerchantSettings::default(),
        }
    }
}

/// The recommendation service.
pub struct Recommender {
    registry: Arc<MerchantRegistry>,
    detector: CategoryDetector,
    resolver: RepresentativeResolver,
    query_builder: QueryVectorBuilder,
    scorer: Scorer,
    index: Arc<dyn VectorIndex>,
}

impl Recommender {
    pub fn new(index: Arc<dyn VectorIndex>, model: Option<Arc<dyn CategoryModel>>) -> Self {
        Self {
            registry: Arc::new(MerchantRegistry::new()),
            detector: CategoryDetector::new(model),
            resolver: RepresentativeResolver::new(Arc::clone(&index)),
            query_builder: QueryVectorBuilder::new(Arc::clone(&index)),
            scorer: Scorer::new(Arc::clone(&index)),
            index,
        }
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Register a merchant's catalog, replacing any prior snapshot.
    ///
    /// Products without an id are skipped with a warning; this is a
    /// per-item condition, never a request failure.
    pub fn register_merchant_products(
        &self,
        merchant_id: &str,
        inputs: Vec<ProductInput>,
    ) -> Result<RegistrationSummary> {
        if merchant_id.trim().is_empty() {
            return Err(Error::InvalidInput("merchant_id is required".to_string()));
        }
        if inputs.is_empty() {
            return Err(Error::InvalidInput("products must not be empty".to_string()));
        }

        let mut products = Vec::with_capacity(inputs.len());
        for input in inputs {
            if input.id.trim().is_empty() {
                warn!(merchant_id, title = %input.title, "Skipping product without id");
                continue;
            }

            let detection = self.detector.detect(&input.title, &input.product_type, &input.tags);
            let representatives =
                self.resolver.representatives(detection.category, REPS_PER_PRODUCT);

            products.push(Product {
                id: input.id,
                title: input.title,
                product_type: input.product_type,
                tags: input.tags,
                price: input.price,
                image: input.image,
                category: detection.category,
                category_confidence: detection.confidence,
                category_method: detection.method,
                representatives,
            });
        }

        let summary = self.registry.replace(merchant_id, products);
        info!(
            merchant_id,
            registered = summary.registered,
            "Merchant catalog registered"
        );
        Ok(summary)
    }

    // =========================================================================
    // RECOMMENDATIONS
    // =========================================================================

    /// Produce ranked recommendations for a request.
    ///
    /// Falls back to the popular path when no signal resolves to any
    /// embedding. Homepage mode (no current product) draws candidates
    /// from the whole catalog without a category restriction. An
    /// unregistered merchant yields an empty result, not an error;
    /// failures are reserved for malformed requests.
    pub fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Recommendation>> {
        if !self.registry.is_registered(&request.merchant_id) {
            warn!(merchant_id = %request.merchant_id, "Merchant not registered, returning empty");
            return Ok(Vec::new());
        }
        let k = request.k.clamp(1, MAX_K);

        let current_id = request.current_product_id.as_deref().filter(|id| !id.is_empty());
        let current = current_id.and_then(|id| self.registry.product(&request.merchant_id, id));

        let (query_vector, target_category) = self.query_builder.build(
            &self.registry,
            &request.merchant_id,
            current_id,
            &request.signals,
            &request.settings.weights,
        );

        let mut candidates = self.registry.products(&request.merchant_id, None);
        candidates = exclude_products(candidates, &self.exclusions(request, current_id));

        // The category restriction needs an anchor product: the current
        // product, else the first cart item. Homepage and history-only
        // requests have none and span the whole catalog.
        let anchor_category = current
            .as_ref()
            .map(|p| p.category)
            .or_else(|| self.first_cart_category(request));
        let filtered = apply_all_filters(
            candidates,
            anchor_category,
            request.location.as_deref(),
            &request.preferences,
            &request.settings.filters,
        );

        let Some(query_vector) = query_vector else {
            // Non-personalized path: neutral score, no ranking
            let results = format_popular(filtered, k);
            info!(
                merchant_id = %request.merchant_id,
                count = results.len(),
                "No query vector, serving popular fallback"
            );
            return Ok(results);
        };

        let ranked = self.scorer.rank(
            &query_vector,
            filtered,
            current.as_ref(),
            &request.settings.filters,
            k,
        );

        let reason = reason_for(&request.signals, current_id);
        let results: Vec<Recommendation> = ranked
            .into_iter()
            .map(|(product, score)| format_recommendation(product, score, reason))
            .collect();

        info!(
            merchant_id = %request.merchant_id,
            count = results.len(),
            target_category = %target_category,
            "Recommendations produced"
        );
        Ok(results)
    }

    /// Cold-start path: filtered catalog products, each with a neutral
    /// score. Unregistered merchants yield an empty result.
    pub fn popular(
        &self,
        merchant_id: &str,
        category: Option<Category>,
        location: Option<&str>,
        preferences: &UserPreferences,
        k: usize,
        settings: &MerchantSettings,
    ) -> Result<Vec<Recommendation>> {
        if !self.registry.is_registered(merchant_id) {
            warn!(merchant_id, "Merchant not registered, returning empty");
            return Ok(Vec::new());
        }
        let k = k.clamp(1, MAX_K);

        let candidates = self.registry.products(merchant_id, category);
        let filtered =
            apply_all_filters(candidates, None, location, preferences, &settings.filters);
        Ok(format_popular(filtered, k))
    }

    // =========================================================================
    // MERCHANT MANAGEMENT
    // =========================================================================

    /// Remove a merchant's snapshot; returns whether it existed.
    pub fn clear_merchant(&self, merchant_id: &str) -> bool {
        self.registry.clear(merchant_id)
    }

    pub fn merchant_products(&self, merchant_id: &str, category: Option<Category>) -> Vec<Product> {
        self.registry.products(merchant_id, category)
    }

    pub fn is_registered(&self, merchant_id: &str) -> bool {
        self.registry.is_registered(merchant_id)
    }

    /// Index health, surfaced by the API health endpoint.
    pub fn index_available(&self) -> bool {
        self.index.is_available()
    }

    pub fn index_size(&self) -> usize {
        self.index.len()
    }

    fn first_cart_category(&self, request: &RecommendRequest) -> Option<Category> {
        request
            .signals
            .recent_cart()
            .iter()
            .find_map(|id| self.registry.product(&request.merchant_id, id))
            .map(|p| p.category)
    }

    fn exclusions(&self, request: &RecommendRequest, current_id: Option<&str>) -> HashSet<String> {
        let mut excluded = HashSet::new();
        if request.exclude_current {
            if let Some(id) = current_id {
                excluded.insert(id.to_string());
            }
        }
        if request.exclude_purchased {
            excluded.extend(request.signals.purchased.iter().cloned());
        }
        if request.exclude_viewed {
            excluded.extend(request.signals.viewed.iter().cloned());
        }
        excluded
    }
}

/// Reason by signal priority: purchases, then current item, then views,
/// then the generic popular reason.
fn reason_for(signals: &SignalBundle, current_id: Option<&str>) -> &'static str {
    if !signals.purchased.is_empty() {
        REASON_PURCHASES
    } else if current_id.is_some() {
        REASON_CURRENT
    } else if !signals.viewed.is_empty() {
        REASON_VIEWS
    } else {
        REASON_POPULAR
    }
}

fn format_recommendation(product: Product, score: f32, reason: &str) -> Recommendation {
    Recommendation {
        product_id: product.id,
        title: product.title,
        category: product.category,
        price: product.price,
        image: product.image,
        tags: product.tags,
        score,
        reason: reason.to_string(),
    }
}

fn format_popular(products: Vec<Product>, k: usize) -> Vec<Recommendation> {
    products
        .into_iter()
        .take(k)
        .map(|p| format_recommendation(p, 1.0, REASON_POPULAR))
        .collect()
}
