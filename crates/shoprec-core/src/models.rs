//! Data models for shoprec.
//!
//! Boundary shapes (`ProductInput`, `SignalBundle`, `UserPreferences`)
//! deserialize defensively: tags accept either a list or a
//! comma-separated string, prices arrive as currency-formatted strings,
//! and unknown fields are ignored. `Product` is the registered shape,
//! augmented with the detected category and representative identifiers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::defaults::{
    BEAUTY_KEYWORDS, ELECTRONICS_KEYWORDS, FASHION_KEYWORDS, HOME_KEYWORDS, MAX_PURCHASED_HISTORY,
    MAX_VIEWED_HISTORY, PRICE_HIGH, PRICE_LOW, PRICE_MEDIUM,
};

// =============================================================================
// CATEGORY
// =============================================================================

/// Product category. The fixed class set the embedding model and the
/// classifier oracle were trained against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Beauty,
    Fashion,
    Electronics,
    /// Fallback default when nothing else matches.
    #[default]
    Home,
}

impl Category {
    /// All categories, in stable order.
    pub const ALL: [Category; 4] = [
        Category::Beauty,
        Category::Fashion,
        Category::Electronics,
        Category::Home,
    ];

    /// Keyword table for the keyword-scoring fallback detector.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Beauty => BEAUTY_KEYWORDS,
            Category::Fashion => FASHION_KEYWORDS,
            Category::Electronics => ELECTRONICS_KEYWORDS,
            Category::Home => HOME_KEYWORDS,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Beauty => write!(f, "beauty"),
            Category::Fashion => write!(f, "fashion"),
            Category::Electronics => write!(f, "electronics"),
            Category::Home => write!(f, "home"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beauty" => Ok(Category::Beauty),
            "fashion" => Ok(Category::Fashion),
            "electronics" => Ok(Category::Electronics),
            "home" => Ok(Category::Home),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

// =============================================================================
// CATEGORY DETECTION
// =============================================================================

/// How a category was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// Classifier oracle, accepted at high confidence.
    #[serde(rename = "ml")]
    Ml,
    /// Keyword scorer only (oracle sub-threshold-disagreeing or unavailable).
    #[serde(rename = "keywords")]
    Keywords,
    /// Sub-threshold oracle result confirmed by the keyword scorer.
    #[serde(rename = "ml+keywords")]
    MlPlusKeywords,
}

impl std::fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectionMethod::Ml => write!(f, "ml"),
            DetectionMethod::Keywords => write!(f, "keywords"),
            DetectionMethod::MlPlusKeywords => write!(f, "ml+keywords"),
        }
    }
}

/// Tagged result of category detection. Keeping the method explicit
/// makes the ML-vs-keyword decision policy auditable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetection {
    pub category: Category,
    /// Confidence in [0.0, 1.0].
    pub confidence: f32,
    pub method: DetectionMethod,
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// Raw product as submitted at registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default, deserialize_with = "de_tags")]
    pub tags: Vec<String>,
    /// Currency-formatted price string, parsed defensively on use.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image: String,
}

/// Registered product, augmented with category detection and the
/// ordered cross-catalog representative list (first entry is primary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub product_type: String,
    pub tags: Vec<String>,
    pub price: String,
    pub image: String,
    pub category: Category,
    pub category_confidence: f32,
    pub category_method: DetectionMethod,
    pub representatives: Vec<String>,
}

impl Product {
    /// Combined lowercase text of title, type, and tags, used for
    /// keyword and climate matching.
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(2 + self.tags.len());
        if !self.title.is_empty() {
            parts.push(self.title.to_lowercase());
        }
        if !self.product_type.is_empty() {
            parts.push(self.product_type.to_lowercase());
        }
        parts.extend(self.tags.iter().filter(|t| !t.is_empty()).map(|t| t.to_lowercase()));
        parts.join(" ")
    }

    /// Lowercased, trimmed, non-empty tags for case-insensitive set
    /// comparison.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// The primary (first) representative, the only one used for the
    /// low-trust viewed signal.
    pub fn primary_representative(&self) -> Option<&str> {
        self.representatives.first().map(|s| s.as_str())
    }

    /// Parsed numeric price, `None` when unparseable.
    pub fn price_value(&self) -> Option<f32> {
        parse_price(&self.price)
    }
}

/// Parse a currency-formatted price string defensively.
///
/// Strips `$`, thousands separators, and surrounding whitespace.
/// Returns `None` for anything that still fails to parse; callers treat
/// dirty prices as "unknown", never as request failures.
pub fn parse_price(raw: &str) -> Option<f32> {
    let cleaned = raw.replace('$', "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f32>().ok().filter(|p| p.is_finite())
}

/// Accept tags as either a JSON list or a comma-separated string.
fn de_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsShape {
        List(Vec<String>),
        Csv(String),
    }

    match TagsShape::deserialize(deserializer)? {
        TagsShape::List(tags) => Ok(tags),
        TagsShape::Csv(s) => Ok(s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()),
    }
}

// =============================================================================
// USER SIGNALS
// =============================================================================

/// Per-request behavioral signals: ordered lists of merchant product
/// identifiers, most recent last. Recency caps are applied on access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalBundle {
    #[serde(default)]
    pub viewed: Vec<String>,
    #[serde(default)]
    pub purchased: Vec<String>,
    #[serde(default)]
    pub added_to_cart: Vec<String>,
}

impl SignalBundle {
    /// Most recent purchased ids, capped.
    pub fn recent_purchased(&self) -> &[String] {
        tail(&self.purchased, MAX_PURCHASED_HISTORY)
    }

    /// Most recent cart ids, capped (shares the purchase cap).
    pub fn recent_cart(&self) -> &[String] {
        tail(&self.added_to_cart, MAX_PURCHASED_HISTORY)
    }

    /// Most recent viewed ids, capped.
    pub fn recent_viewed(&self) -> &[String] {
        tail(&self.viewed, MAX_VIEWED_HISTORY)
    }

    pub fn is_empty(&self) -> bool {
        self.viewed.is_empty() && self.purchased.is_empty() && self.added_to_cart.is_empty()
    }
}

fn tail(items: &[String], cap: usize) -> &[String] {
    let start = items.len().saturating_sub(cap);
    &items[start..]
}

// =============================================================================
// USER PREFERENCES
// =============================================================================

/// Price bracket for preference filtering. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRange {
    Low,
    Medium,
    High,
}

impl PriceRange {
    /// Inclusive (min, max) bounds for this bracket.
    pub fn bounds(&self) -> (f32, f32) {
        match self {
            PriceRange::Low => PRICE_LOW,
            PriceRange::Medium => PRICE_MEDIUM,
            PriceRange::High => PRICE_HIGH,
        }
    }

    /// Whether a price falls inside this bracket.
    pub fn contains(&self, price: f32) -> bool {
        let (min, max) = self.bounds();
        price >= min && price <= max
    }
}

impl std::str::FromStr for PriceRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(PriceRange::Low),
            "medium" => Ok(PriceRange::Medium),
            "high" => Ok(PriceRange::High),
            _ => Err(format!("Invalid price range: {}", s)),
        }
    }
}

/// Shopper preference flags accepted at the request boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub sustainable: bool,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

impl UserPreferences {
    pub fn is_empty(&self) -> bool {
        !self.vegan && !self.sustainable && self.price_range.is_none()
    }
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

/// One ranked recommendation record returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: String,
    pub title: String,
    pub category: Category,
    pub price: String,
    pub image: String,
    pub tags: Vec<String>,
    /// Final score, rounded to three decimal places.
    pub score: f32,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(tags: &[&str]) -> Product {
        Product {
            id: "p1".into(),
            title: "Organic Face Cream".into(),
            product_type: "Beauty".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            price: "29.99".into(),
            image: String::new(),
            category: Category::Beauty,
            category_confidence: 0.9,
            category_method: DetectionMethod::Ml,
            representatives: vec!["rep-1".into(), "rep-2".into()],
        }
    }

    #[test]
    fn test_category_display_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(Category::from_str(&cat.to_string()).unwrap(), cat);
        }
    }

    #[test]
    fn test_category_from_str_invalid() {
        assert!(Category::from_str("toys").is_err());
    }

    #[test]
    fn test_category_default_is_home() {
        assert_eq!(Category::default(), Category::Home);
    }

    #[test]
    fn test_detection_method_display() {
        assert_eq!(DetectionMethod::Ml.to_string(), "ml");
        assert_eq!(DetectionMethod::Keywords.to_string(), "keywords");
        assert_eq!(DetectionMethod::MlPlusKeywords.to_string(), "ml+keywords");
    }

    #[test]
    fn test_parse_price_currency_formats() {
        assert_eq!(parse_price("29.99"), Some(29.99));
        assert_eq!(parse_price("$1,299.00"), Some(1299.0));
        assert_eq!(parse_price("  45 "), Some(45.0));
    }

    #[test]
    fn test_parse_price_garbage() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price("N/A"), None);
    }

    #[test]
    fn test_tags_accept_list_and_csv() {
        let from_list: ProductInput =
            serde_json::from_str(r#"{"id":"a","tags":["vegan","skincare"]}"#).unwrap();
        assert_eq!(from_list.tags, vec!["vegan", "skincare"]);

        let from_csv: ProductInput =
            serde_json::from_str(r#"{"id":"a","tags":"vegan, skincare , "}"#).unwrap();
        assert_eq!(from_csv.tags, vec!["vegan", "skincare"]);
    }

    #[test]
    fn test_combined_text_lowercases_everything() {
        let p = product(&["Vegan", "SPF"]);
        assert_eq!(p.combined_text(), "organic face cream beauty vegan spf");
    }

    #[test]
    fn test_normalized_tags_drops_empties() {
        let p = product(&[" Vegan ", "", "SPF"]);
        assert_eq!(p.normalized_tags(), vec!["vegan", "spf"]);
    }

    #[test]
    fn test_signal_bundle_recency_caps() {
        let bundle = SignalBundle {
            viewed: (0..8).map(|i| format!("v{}", i)).collect(),
            purchased: (0..7).map(|i| format!("p{}", i)).collect(),
            added_to_cart: vec!["c1".into()],
        };
        assert_eq!(bundle.recent_viewed().len(), 5);
        assert_eq!(bundle.recent_viewed()[0], "v3");
        assert_eq!(bundle.recent_purchased().len(), 5);
        assert_eq!(bundle.recent_purchased()[0], "p2");
        assert_eq!(bundle.recent_cart(), ["c1".to_string()]);
    }

    #[test]
    fn test_price_range_bounds_inclusive() {
        assert!(PriceRange::Low.contains(50.0));
        assert!(!PriceRange::Low.contains(50.01));
        assert!(PriceRange::Medium.contains(20.0));
        assert!(PriceRange::High.contains(100.0));
        assert!(PriceRange::High.contains(10_000.0));
    }

    #[test]
    fn test_price_range_serde_lowercase() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"vegan":true,"price_range":"medium"}"#).unwrap();
        assert!(prefs.vegan);
        assert_eq!(prefs.price_range, Some(PriceRange::Medium));
    }
}
