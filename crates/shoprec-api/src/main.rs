//! shoprec-api - HTTP API server for shoprec

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shoprec_api::{build_router, AppState};
use shoprec_core::defaults::SERVER_PORT;
use shoprec_core::{Category, VectorIndex};
use shoprec_engine::{FlatIndex, KeywordCategoryModel, Recommender};

/// One entry in the index artifact file.
#[derive(Debug, Deserialize)]
struct IndexEntry {
    id: String,
    category: Category,
    embedding: Vec<f32>,
}

/// Load the pretrained index artifact if configured, else start with an
/// empty index. An empty index serves non-personalized results only.
fn load_index() -> shoprec_core::Result<FlatIndex> {
    let mut index = FlatIndex::new();
    let Ok(path) = std::env::var("SHOPREC_INDEX_PATH") else {
        warn!("SHOPREC_INDEX_PATH not set, starting with an empty index");
        return Ok(index);
    };

    let raw = std::fs::read_to_string(&path)?;
    let entries: Vec<IndexEntry> = serde_json::from_str(&raw)?;
    index.load(
        entries
            .into_iter()
            .map(|e| (e.id, e.category, e.embedding))
            .collect(),
    );
    info!(path, "Index artifact loaded");
    Ok(index)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    //
    // Environment variables:
    //   RUST_LOG - standard env filter (default: "shoprec_api=debug,tower_http=debug")
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoprec_api=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let index = Arc::new(load_index()?);
    info!(index_size = index.len(), "Recommendation engine starting");

    let recommender = Arc::new(Recommender::new(
        index,
        Some(Arc::new(KeywordCategoryModel::new())),
    ));
    let app = build_router(AppState { recommender });

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(SERVER_PORT);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
