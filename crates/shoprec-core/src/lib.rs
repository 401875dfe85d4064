//! # shoprec-core
//!
//! Core types, traits, and abstractions for the shoprec recommendation
//! engine.
//!
//! This crate provides:
//! - Product, category, and recommendation data models
//! - Merchant settings normalization (toggles and signal weights)
//! - Oracle traits for the vector index and category classifier
//! - Default constant tables (keywords, climate regions, price brackets)
//! - Vector math helpers for cosine-similarity scoring

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod settings;
pub mod traits;
pub mod vector;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{
    parse_price, Category, CategoryDetection, DetectionMethod, PriceRange, Product, ProductInput,
    Recommendation, SignalBundle, UserPreferences,
};
pub use settings::{
    EthicalFilterSettings, FilterSettings, MerchantSettings, PriceProximitySettings, SignalWeights,
    TagBoostSettings,
};
pub use traits::{CategoryModel, VectorIndex};
pub use vector::{cosine, l2_normalize, weighted_mean};
