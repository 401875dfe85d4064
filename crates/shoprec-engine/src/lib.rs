//! # shoprec-engine
//!
//! The shoprec recommendation engine: bridges a merchant's own catalog
//! to a pretrained cross-catalog embedding space and produces
//! personalized "similar products" recommendations.
//!
//! Pipeline:
//! 1. Registration maps merchant products into the embedding space via
//!    category detection and representative selection
//! 2. A recommendation request builds one weighted query vector from
//!    multi-signal user behavior
//! 3. Candidates from the merchant registry pass through the filter
//!    pipeline (category, climate, ethical, price)
//! 4. The scorer ranks survivors by cosine similarity plus tag-overlap
//!    and price-proximity bonuses
//!
//! All services are explicitly constructed and dependency-injected; the
//! oracle collaborators (vector index, category classifier) are passed
//! in as `Arc<dyn ...>` handles at startup.

pub mod detector;
pub mod filters;
pub mod index;
pub mod mock;
pub mod query;
pub mod recommender;
pub mod registry;
pub mod representatives;
pub mod scorer;

// Re-export core types
pub use shoprec_core::*;

// Re-export engine types
pub use detector::CategoryDetector;
pub use filters::{
    apply_all_filters, apply_category_filter, apply_ethical_filters, apply_location_filter,
    apply_price_filter, classify_climate, exclude_products, Climate,
};
pub use index::{FlatIndex, KeywordCategoryModel};
pub use query::QueryVectorBuilder;
pub use recommender::{RecommendRequest, Recommender};
pub use registry::{MerchantRegistry, RegistrationSummary};
pub use representatives::RepresentativeResolver;
pub use scorer::Scorer;
