//! Request handlers.
//!
//! Thin I/O over the engine: deserialize the boundary shape, call the
//! recommender, map errors to status codes. Validation failures are
//! 400s, unknown merchants are 404s on the management endpoints (the
//! recommendation endpoints degrade to empty results instead),
//! everything unexpected is reported generically as a 500 without
//! details.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use shoprec_core::defaults::DEFAULT_K;
use shoprec_core::{Category, Error, MerchantSettings, ProductInput, SignalBundle, UserPreferences};
use shoprec_engine::RecommendRequest;

use crate::AppState;

fn default_true() -> bool {
    true
}

fn default_k() -> usize {
    DEFAULT_K
}

// =============================================================================
// HEALTH
// =============================================================================

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "index_available": state.recommender.index_available(),
        "index_size": state.recommender.index_size(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe; never touches the index.
pub async fn health_live() -> Json<serde_json::Value> {
    Json(json!({"status": "alive"}))
}

// =============================================================================
// MERCHANT REGISTRATION
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub products: Vec<ProductInput>,
}

pub async fn register_merchant(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Response {
    match state
        .recommender
        .register_merchant_products(&body.merchant_id, body.products)
    {
        Ok(summary) => Json(json!({
            "success": true,
            "merchant_id": summary.merchant_id,
            "registered": summary.registered,
            "categories": summary.categories,
        }))
        .into_response(),
        Err(err) => engine_error(err),
    }
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RecommendBody {
    #[serde(default)]
    pub merchant_id: String,
    /// Product the shopper is viewing; omit for homepage mode.
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub user_history: SignalBundle,
    #[serde(default)]
    pub user_location: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default = "default_k")]
    pub num_recommendations: usize,
    #[serde(default = "default_true")]
    pub exclude_current: bool,
    #[serde(default)]
    pub exclude_viewed: bool,
    #[serde(default = "default_true")]
    pub exclude_purchased: bool,
    #[serde(default)]
    pub settings: MerchantSettings,
}

pub async fn recommend(State(state): State<AppState>, Json(body): Json<RecommendBody>) -> Response {
    if body.merchant_id.trim().is_empty() {
        return engine_error(Error::InvalidInput("merchant_id is required".to_string()));
    }

    let request = RecommendRequest {
        merchant_id: body.merchant_id,
        current_product_id: body.product_id,
        signals: body.user_history,
        location: body.user_location,
        preferences: body.preferences,
        k: body.num_recommendations,
        exclude_current: body.exclude_current,
        exclude_viewed: body.exclude_viewed,
        exclude_purchased: body.exclude_purchased,
        settings: body.settings,
    };

    match state.recommender.recommend(&request) {
        Ok(recommendations) => Json(json!({
            "success": true,
            "count": recommendations.len(),
            "recommendations": recommendations,
        }))
        .into_response(),
        Err(err) => engine_error(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct PopularBody {
    #[serde(default)]
    pub merchant_id: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub user_location: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default = "default_k")]
    pub num_recommendations: usize,
    #[serde(default)]
    pub settings: MerchantSettings,
}

/// Cold-start endpoint: filtered popular products, no personalization.
pub async fn popular(State(state): State<AppState>, Json(body): Json<PopularBody>) -> Response {
    if body.merchant_id.trim().is_empty() {
        return engine_error(Error::InvalidInput("merchant_id is required".to_string()));
    }

    match state.recommender.popular(
        &body.merchant_id,
        body.category,
        body.user_location.as_deref(),
        &body.preferences,
        body.num_recommendations,
        &body.settings,
    ) {
        Ok(recommendations) => Json(json!({
            "success": true,
            "count": recommendations.len(),
            "recommendations": recommendations,
        }))
        .into_response(),
        Err(err) => engine_error(err),
    }
}

// =============================================================================
// MERCHANT MANAGEMENT
// =============================================================================

pub async fn clear_merchant(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
) -> Response {
    if state.recommender.clear_merchant(&merchant_id) {
        Json(json!({"success": true, "merchant_id": merchant_id})).into_response()
    } else {
        engine_error(Error::MerchantNotFound(merchant_id))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
}

pub async fn merchant_products(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    Query(query): Query<ProductsQuery>,
) -> Response {
    if !state.recommender.is_registered(&merchant_id) {
        return engine_error(Error::MerchantNotFound(merchant_id));
    }

    let category = match query.category.as_deref() {
        Some(raw) => match Category::from_str(raw) {
            Ok(category) => Some(category),
            Err(message) => return engine_error(Error::InvalidInput(message)),
        },
        None => None,
    };

    let products = state.recommender.merchant_products(&merchant_id, category);
    Json(json!({
        "success": true,
        "count": products.len(),
        "products": products,
    }))
    .into_response()
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map an engine error to a response. Unexpected errors are logged with
/// detail but reported generically.
fn engine_error(err: Error) -> Response {
    let (status, message) = match &err {
        Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        Error::MerchantNotFound(_) | Error::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        _ => {
            error!(error = %err, "Unexpected error handling request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    };
    (status, Json(json!({"success": false, "error": message}))).into_response()
}
