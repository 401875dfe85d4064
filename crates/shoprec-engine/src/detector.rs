//! Hybrid ML/keyword category detection.
//!
//! The classifier oracle is trained on synthetic weak-supervision data
//! and is unreliable near its decision boundary, so its answer is only
//! accepted outright at high confidence. Below the threshold the
//! deterministic keyword scorer cross-checks it; on disagreement the
//! keyword result wins. Keyword matching is auditable, which is the
//! point of keeping it in the loop.

use std::sync::Arc;

use tracing::{debug, warn};

use shoprec_core::defaults::{KEYWORD_CONFIDENCE, ML_CONFIDENCE_THRESHOLD};
use shoprec_core::{Category, CategoryDetection, CategoryModel, DetectionMethod};

/// Category detector orchestrating the classifier oracle and the
/// keyword-scoring fallback.
pub struct CategoryDetector {
    model: Option<Arc<dyn CategoryModel>>,
}

impl CategoryDetector {
    /// Create a detector. Passing `None` runs keyword-only detection.
    pub fn new(model: Option<Arc<dyn CategoryModel>>) -> Self {
        Self { model }
    }

    /// Detect the category for a product from its title, type, and tags.
    ///
    /// Decision policy:
    /// 1. Oracle confidence >= 0.6: accept, method `ml`
    /// 2. Sub-threshold and keywords agree: accept, confidence 0.5,
    ///    method `ml+keywords`
    /// 3. Sub-threshold and keywords disagree: keyword result,
    ///    confidence 0.5, method `keywords`
    /// 4. Oracle errors: keyword result, method `keywords`
    pub fn detect(&self, title: &str, product_type: &str, tags: &[String]) -> CategoryDetection {
        let text = combine_text(title, product_type, tags);

        if let Some(model) = &self.model {
            match model.classify(&text) {
                Ok((ml_category, ml_confidence)) if ml_confidence >= ML_CONFIDENCE_THRESHOLD => {
                    debug!(
                        category = %ml_category,
                        confidence = ml_confidence,
                        title,
                        "ML classification accepted"
                    );
                    return CategoryDetection {
                        category: ml_category,
                        confidence: ml_confidence,
                        method: DetectionMethod::Ml,
                    };
                }
                Ok((ml_category, ml_confidence)) => {
                    // Medium confidence: cross-check with keywords
                    let kw_category = keyword_category(&text, product_type);
                    if kw_category == ml_category {
                        return CategoryDetection {
                            category: ml_category,
                            confidence: KEYWORD_CONFIDENCE,
                            method: DetectionMethod::MlPlusKeywords,
                        };
                    }

                    debug!(
                        ml_category = %ml_category,
                        ml_confidence,
                        keyword_category = %kw_category,
                        title,
                        "ML/keyword disagreement, trusting keywords"
                    );
                    return CategoryDetection {
                        category: kw_category,
                        confidence: KEYWORD_CONFIDENCE,
                        method: DetectionMethod::Keywords,
                    };
                }
                Err(e) => {
                    warn!(error = %e, "ML category detection failed, falling back to keywords");
                }
            }
        }

        CategoryDetection {
            category: keyword_category(&text, product_type),
            confidence: KEYWORD_CONFIDENCE,
            method: DetectionMethod::Keywords,
        }
    }
}

/// Combine product fields into one lowercase text for matching.
fn combine_text(title: &str, product_type: &str, tags: &[String]) -> String {
    let mut parts = vec![title.to_lowercase(), product_type.to_lowercase()];
    parts.extend(tags.iter().map(|t| t.to_lowercase()));
    parts.join(" ")
}

/// Deterministic keyword-count category scorer.
///
/// Each matched keyword phrase contributes its word count to the
/// category score, so multi-word phrases outrank incidental single-word
/// hits. The highest nonzero score wins; ties keep the earlier category
/// in the fixed ordering. An all-zero score falls back to probing the
/// product type for a literal category name, then the default.
pub fn keyword_category(text: &str, product_type: &str) -> Category {
    let mut best: Option<(Category, usize)> = None;

    for category in Category::ALL {
        let mut score = 0usize;
        for keyword in category.keywords() {
            if text.contains(keyword) {
                score += keyword.split_whitespace().count();
            }
        }
        if score > 0 && best.map_or(true, |(_, s)| score > s) {
            best = Some((category, score));
        }
    }

    if let Some((category, _)) = best {
        return category;
    }

    let product_type = product_type.to_lowercase();
    for category in Category::ALL {
        if product_type.contains(&category.to_string()) {
            return category;
        }
    }

    Category::default()
}
