mod config;
mod errors;
mod models;
mod ranking;
mod routes;
mod similarity_client;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::ranking::similarity::{KeywordSimilarity, SimilarityProvider};
use crate::ranking::Ranker;
use crate::routes::build_router;
use crate::similarity_client::RemoteSimilarity;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Candidate Ranker v{}", env!("CARGO_PKG_VERSION"));

    // Weights are validated here, before any request is served
    let ranker = Ranker::new(config.ranker).context("Invalid ranking configuration")?;
    info!("Ranker initialized with weights {:?}", ranker.weights());

    // Semantic provider is optional; keyword matching is the default
    let similarity: Arc<dyn SimilarityProvider> = match &config.semantic_api_url {
        Some(url) => {
            let client = RemoteSimilarity::new(url.clone(), config.semantic_api_key.clone())
                .context("Failed to build similarity client")?;
            info!(
                "Semantic similarity provider at {url} (blend {})",
                config.ranker.semantic_blend
            );
            Arc::new(client)
        }
        None => {
            info!("No semantic provider configured, using keyword description matching");
            Arc::new(KeywordSimilarity)
        }
    };

    let state = AppState {
        config: config.clone(),
        ranker: Arc::new(ranker),
        similarity,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
