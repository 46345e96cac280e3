use std::sync::Arc;

use crate::config::Config;
use crate::ranking::similarity::SimilarityProvider;
use crate::ranking::Ranker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub ranker: Arc<Ranker>,
    /// Description matching backend. `KeywordSimilarity` unless a semantic
    /// service is configured.
    pub similarity: Arc<dyn SimilarityProvider>,
}

impl AppState {
    pub fn description_backend(&self) -> &'static str {
        self.similarity.backend()
    }
}
