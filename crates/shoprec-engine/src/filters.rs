//! Candidate filter pipeline.
//!
//! Three ordered stages, each toggle-able per merchant: category first
//! (cheapest and most restrictive), then location/climate, then
//! ethical/price preferences. Each stage consumes the previous stage's
//! output. Unrecognized locations and unparseable prices pass through
//! rather than dropping inventory on dirty data.

use std::collections::HashSet;

use tracing::debug;

use shoprec_core::defaults::{
    COLD_CLIMATE_ISO_CODES, COLD_CLIMATE_REGIONS, HOT_CLIMATE_ISO_CODES, HOT_CLIMATE_REGIONS,
    SUMMER_KEYWORDS, SUSTAINABLE_KEYWORDS, VEGAN_KEYWORDS, WINTER_KEYWORDS,
};
use shoprec_core::{Category, FilterSettings, PriceRange, Product, UserPreferences};

// =============================================================================
// CLIMATE CLASSIFICATION
// =============================================================================

/// Climate classification of a shopper location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Climate {
    Hot,
    Cold,
    /// Unrecognized locations pass through the location filter.
    Unknown,
}

/// Classify a location string as hot, cold, or unknown.
///
/// A bare 2-letter alpha code (or the country prefix of a subdivision
/// code like `PK-PB`) is looked up in the ISO climate sets; anything
/// else is substring-matched against the region-name lists.
pub fn classify_climate(location: &str) -> Climate {
    let normalized = location.trim().to_lowercase();
    if normalized.is_empty() {
        return Climate::Unknown;
    }

    let code = normalized.split('-').next().unwrap_or(&normalized).trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        if HOT_CLIMATE_ISO_CODES.contains(&code) {
            return Climate::Hot;
        }
        if COLD_CLIMATE_ISO_CODES.contains(&code) {
            return Climate::Cold;
        }
        return Climate::Unknown;
    }

    if HOT_CLIMATE_REGIONS.iter().any(|r| normalized.contains(r)) {
        return Climate::Hot;
    }
    if COLD_CLIMATE_REGIONS.iter().any(|r| normalized.contains(r)) {
        return Climate::Cold;
    }

    Climate::Unknown
}

// =============================================================================
// FILTER STAGES
// =============================================================================

/// Keep only products matching the target category exactly.
pub fn apply_category_filter(products: Vec<Product>, target: Category) -> Vec<Product> {
    products.into_iter().filter(|p| p.category == target).collect()
}

/// Exclude seasonally inappropriate products for the shopper's climate.
///
/// Hot climates drop winter-keyword matches, cold climates drop
/// summer-keyword matches. Matching is case-insensitive substring over
/// the combined title, type, and tags.
pub fn apply_location_filter(products: Vec<Product>, location: &str) -> Vec<Product> {
    let excluded: &[&str] = match classify_climate(location) {
        Climate::Hot => WINTER_KEYWORDS,
        Climate::Cold => SUMMER_KEYWORDS,
        Climate::Unknown => return products,
    };

    let before = products.len();
    let kept: Vec<Product> = products
        .into_iter()
        .filter(|p| {
            let text = p.combined_text();
            !excluded.iter().any(|kw| text.contains(kw))
        })
        .collect();

    if kept.len() < before {
        debug!(
            location,
            excluded = before - kept.len(),
            "Location filter excluded seasonal products"
        );
    }
    kept
}

/// Apply vegan, sustainability, and price-bracket preference filters.
///
/// Vegan and sustainable are keep-only-if-any-qualifying-keyword;
/// products with unparseable prices are kept by the price bracket.
pub fn apply_ethical_filters(products: Vec<Product>, preferences: &UserPreferences) -> Vec<Product> {
    let mut kept = products;

    if preferences.vegan {
        kept.retain(|p| {
            let text = p.combined_text();
            VEGAN_KEYWORDS.iter().any(|kw| text.contains(kw))
        });
    }

    if preferences.sustainable {
        kept.retain(|p| {
            let text = p.combined_text();
            SUSTAINABLE_KEYWORDS.iter().any(|kw| text.contains(kw))
        });
    }

    if let Some(range) = preferences.price_range {
        kept = apply_price_filter(kept, range);
    }

    kept
}

/// Keep products inside the price bracket; unparseable prices are kept.
pub fn apply_price_filter(products: Vec<Product>, range: PriceRange) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| match p.price_value() {
            Some(price) => range.contains(price),
            None => true,
        })
        .collect()
}

/// Drop products whose id is in the exclusion set (current product,
/// purchase history, and so on).
pub fn exclude_products(products: Vec<Product>, excluded: &HashSet<String>) -> Vec<Product> {
    if excluded.is_empty() {
        return products;
    }
    products.into_iter().filter(|p| !excluded.contains(&p.id)).collect()
}

/// Run the full pipeline: category, then location, then ethical/price.
///
/// The ethical stage runs when merchant settings enable it or the
/// shopper supplied any preference; enabled merchant-level vegan and
/// sustainable toggles force-merge into the shopper's preferences.
pub fn apply_all_filters(
    products: Vec<Product>,
    target_category: Option<Category>,
    location: Option<&str>,
    preferences: &UserPreferences,
    settings: &FilterSettings,
) -> Vec<Product> {
    let mut kept = products;

    if settings.same_category_only {
        if let Some(target) = target_category {
            kept = apply_category_filter(kept, target);
        }
    }

    if settings.location_enabled {
        if let Some(location) = location {
            kept = apply_location_filter(kept, location);
        }
    }

    let effective = effective_preferences(preferences, settings);
    if !effective.is_empty() {
        kept = apply_ethical_filters(kept, &effective);
    }

    kept
}

fn effective_preferences(preferences: &UserPreferences, settings: &FilterSettings) -> UserPreferences {
    let mut effective = preferences.clone();
    if settings.ethical.enabled {
        effective.vegan |= settings.ethical.vegan;
        effective.sustainable |= settings.ethical.sustainable;
    }
    effective
}
