//! Merchant settings normalization.
//!
//! Merchant dashboards send nested toggles in more than one shape:
//! a stage can arrive as a bare boolean (`"locationFilter": false`) or
//! as an object (`"locationFilter": {"enabled": false}`). Weights can
//! be missing or non-numeric. Everything is normalized here, once, at
//! the boundary into one strongly-typed struct with defaults resolved;
//! call sites never re-derive toggle semantics.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::defaults::{
    PRICE_PROXIMITY_RANGE, TAG_BOOST_WEIGHT, WEIGHT_CART, WEIGHT_CURRENT, WEIGHT_PURCHASED,
    WEIGHT_VIEWED,
};

// =============================================================================
// FILTER SETTINGS
// =============================================================================

/// Ethical filter stage: merchant-level toggles that, when enabled,
/// merge into (and can force-enable) the shopper's own preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthicalFilterSettings {
    pub enabled: bool,
    pub vegan: bool,
    pub sustainable: bool,
}

impl Default for EthicalFilterSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            vegan: false,
            sustainable: false,
        }
    }
}

/// Price-proximity behavior: hard window filter plus ranking bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceProximitySettings {
    pub enabled: bool,
    /// Window as a fraction of the current product's price.
    pub range: f32,
}

impl Default for PriceProximitySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            range: PRICE_PROXIMITY_RANGE,
        }
    }
}

/// Tag-overlap ranking bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagBoostSettings {
    pub enabled: bool,
    pub weight: f32,
}

impl Default for TagBoostSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: TAG_BOOST_WEIGHT,
        }
    }
}

/// Per-merchant filter pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSettings {
    /// Restrict recommendations to the target category (default on).
    pub same_category_only: bool,
    /// Climate-based location filtering (default on).
    pub location_enabled: bool,
    pub ethical: EthicalFilterSettings,
    pub price_proximity: PriceProximitySettings,
    pub tag_boost: TagBoostSettings,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            same_category_only: true,
            location_enabled: true,
            ethical: EthicalFilterSettings::default(),
            price_proximity: PriceProximitySettings::default(),
            tag_boost: TagBoostSettings::default(),
        }
    }
}

// =============================================================================
// SIGNAL WEIGHTS
// =============================================================================

/// Effective per-signal weights for query vector construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub purchased: f32,
    pub cart: f32,
    pub current: f32,
    pub viewed: f32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            purchased: WEIGHT_PURCHASED,
            cart: WEIGHT_CART,
            current: WEIGHT_CURRENT,
            viewed: WEIGHT_VIEWED,
        }
    }
}

// =============================================================================
// MERCHANT SETTINGS
// =============================================================================

/// Fully normalized merchant settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MerchantSettings {
    pub filters: FilterSettings,
    pub weights: SignalWeights,
}

impl MerchantSettings {
    /// Normalize a raw settings payload. `None` and unrecognized
    /// structures yield the documented defaults; recognized keys
    /// override them. Missing or non-numeric weight overrides are
    /// ignored.
    pub fn from_value(value: Option<&Value>) -> Self {
        let mut settings = MerchantSettings::default();
        let Some(Value::Object(root)) = value else {
            return settings;
        };

        if let Some(Value::Object(filters)) = root.get("filters") {
            if let Some(v) = filters.get("sameCategoryOnly").and_then(Value::as_bool) {
                settings.filters.same_category_only = v;
            }
            settings.filters.location_enabled =
                toggle(filters.get("locationFilter"), settings.filters.location_enabled);

            let ethical = filters.get("ethicalFilter");
            settings.filters.ethical.enabled = toggle(ethical, settings.filters.ethical.enabled);
            if let Some(Value::Object(eth)) = ethical {
                settings.filters.ethical.vegan =
                    eth.get("vegan").and_then(Value::as_bool).unwrap_or(false);
                settings.filters.ethical.sustainable =
                    eth.get("sustainable").and_then(Value::as_bool).unwrap_or(false);
            }

            let price_prox = filters.get("priceProximity");
            settings.filters.price_proximity.enabled =
                toggle(price_prox, settings.filters.price_proximity.enabled);
            if let Some(Value::Object(pp)) = price_prox {
                if let Some(range) = lenient_f32(pp.get("range")) {
                    settings.filters.price_proximity.range = range;
                }
            }

            let tag_boost = filters.get("tagBoost");
            settings.filters.tag_boost.enabled =
                toggle(tag_boost, settings.filters.tag_boost.enabled);
            if let Some(Value::Object(tb)) = tag_boost {
                if let Some(weight) = lenient_f32(tb.get("weight")) {
                    settings.filters.tag_boost.weight = weight;
                }
            }
        }

        if let Some(Value::Object(weights)) = root.get("weights") {
            if let Some(w) = lenient_f32(weights.get("purchaseHistory")) {
                settings.weights.purchased = w;
            }
            if let Some(w) = lenient_f32(weights.get("cartItems")) {
                settings.weights.cart = w;
            }
            if let Some(w) = lenient_f32(weights.get("currentProduct")) {
                settings.weights.current = w;
            }
            if let Some(w) = lenient_f32(weights.get("browsingHistory")) {
                settings.weights.viewed = w;
            }
        }

        settings
    }
}

impl<'de> Deserialize<'de> for MerchantSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(MerchantSettings::from_value(Some(&value)))
    }
}

/// Read a toggle that may be a bare bool or `{"enabled": bool}`.
fn toggle(value: Option<&Value>, default: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Object(obj)) => obj.get("enabled").and_then(Value::as_bool).unwrap_or(default),
        _ => default,
    }
}

/// Read a numeric override. Dashboards sometimes send numbers as
/// strings; those parse too. Anything else is ignored.
fn lenient_f32(value: Option<&Value>) -> Option<f32> {
    match value? {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }
}
