//! # shoprec-api
//!
//! HTTP API server for shoprec: a thin axum layer over the
//! recommendation engine. Handlers validate the request shape and map
//! engine errors to status codes; all recommendation semantics live in
//! `shoprec-engine`.

pub mod handlers;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use shoprec_engine::Recommender;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation and debugging production incidents.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the API router with the full middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/health/live", get(handlers::health_live))
        .route("/api/merchant/register", post(handlers::register_merchant))
        .route("/api/recommend", post(handlers::recommend))
        .route("/api/popular", post(handlers::popular))
        .route("/api/merchant/:merchant_id", delete(handlers::clear_merchant))
        .route(
            "/api/merchant/:merchant_id/products",
            get(handlers::merchant_products),
        )
        // A panicking handler must never take the process down
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        // Storefront widgets call from arbitrary shop domains
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        )
        .with_state(state)
}
