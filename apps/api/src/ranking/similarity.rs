//! Semantic similarity seam for description matching.
//!
//! Default: `KeywordSimilarity` (the keyword-overlap method, no I/O).
//! Optional: `similarity_client::RemoteSimilarity` (external embedding service).
//!
//! `AppState` always holds one `Arc<dyn SimilarityProvider>`. When it is not
//! semantic the ranker stays on the synchronous keyword path.

use async_trait::async_trait;
use thiserror::Error;

use crate::ranking::text_similarity::description_similarity;

#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    #[error("provider returned an invalid score: {0}")]
    InvalidScore(f64),

    #[error("provider unavailable after {retries} retries")]
    Exhausted { retries: u32 },
}

/// Scores how similar a job description is to a candidate's full profile text.
/// Implementations return a value in [0, 1].
#[async_trait]
pub trait SimilarityProvider: Send + Sync {
    /// Short label for logs and `/health`.
    fn backend(&self) -> &'static str;

    /// `false` for providers that only restate the keyword description score,
    /// letting the ranker skip the async path entirely.
    fn is_semantic(&self) -> bool {
        true
    }

    async fn similarity(&self, job_text: &str, candidate_text: &str)
        -> Result<f64, SimilarityError>;
}

/// Keyword-overlap provider. Never fails.
pub struct KeywordSimilarity;

#[async_trait]
impl SimilarityProvider for KeywordSimilarity {
    fn backend(&self) -> &'static str {
        "keyword"
    }

    fn is_semantic(&self) -> bool {
        false
    }

    async fn similarity(
        &self,
        job_text: &str,
        candidate_text: &str,
    ) -> Result<f64, SimilarityError> {
        Ok(description_similarity(job_text, candidate_text))
    }
}

/// Rejects NaN and out-of-range provider answers.
pub fn checked_score(score: f64) -> Result<f64, SimilarityError> {
    if score.is_finite() && (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(SimilarityError::InvalidScore(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keyword_provider_matches_keyword_scorer() {
        let job = "Design distributed storage engines";
        let profile = "rust engineer working on distributed storage";
        let score = KeywordSimilarity.similarity(job, profile).await.unwrap();
        assert_eq!(score, description_similarity(job, profile));
        assert_eq!(KeywordSimilarity.backend(), "keyword");
        assert!(!KeywordSimilarity.is_semantic());
    }

    #[test]
    fn test_checked_score_bounds() {
        assert_eq!(checked_score(0.0).unwrap(), 0.0);
        assert_eq!(checked_score(1.0).unwrap(), 1.0);
        assert!(checked_score(1.01).is_err());
        assert!(checked_score(-0.1).is_err());
        assert!(checked_score(f64::NAN).is_err());
    }
}
