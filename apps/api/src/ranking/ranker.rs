//! Ranking Orchestrator: scores every candidate of a batch and orders them.
//!
//! Candidates are scored independently against one shared evaluation instant,
//! then stable-sorted by total score, so equal scores keep their input order.

use std::cmp::Ordering;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{CandidateProfile, JobRequirement};
use crate::ranking::aggregator::{ScoreAggregator, ScoringContext, ScoringResult};
use crate::ranking::similarity::{checked_score, SimilarityProvider};
use crate::ranking::text_similarity::candidate_profile_text;
use crate::ranking::weights::{ConfigError, ScoreWeights};

#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("required_skills must contain at least one skill")]
    EmptyRequiredSkills,

    #[error("min_years_experience must be a finite, non-negative number (got {0})")]
    InvalidMinYears(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    pub weights: ScoreWeights,
    /// 1.0 lets a semantic provider replace the keyword description score,
    /// 0.0 ignores it.
    pub semantic_blend: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            semantic_blend: 1.0,
        }
    }
}

/// Provider calls in flight at once for one batch.
pub const MAX_CONCURRENT_SIMILARITY_CALLS: usize = 8;

/// One ranked entry. `position` is the candidate's index in the input.
#[derive(Debug, Clone)]
pub struct RankedCandidate<'a> {
    pub position: usize,
    pub candidate: &'a CandidateProfile,
    pub result: ScoringResult,
}

/// A finished batch, best candidate first.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    pub ranking_id: Uuid,
    /// The single instant "present" resolved to for every candidate.
    pub evaluated_at: DateTime<Utc>,
    pub candidates: Vec<RankedCandidate<'a>>,
}

#[derive(Debug, Clone)]
pub struct Ranker {
    aggregator: ScoreAggregator,
    semantic_blend: f64,
}

/// The one input check the engine enforces; everything else falls back to
/// documented defaults.
pub fn validate_job(job: &JobRequirement) -> Result<(), RankingError> {
    if job.required_skills.iter().all(|s| s.trim().is_empty()) {
        return Err(RankingError::EmptyRequiredSkills);
    }
    if !job.min_years_experience.is_finite() || job.min_years_experience < 0.0 {
        return Err(RankingError::InvalidMinYears(job.min_years_experience));
    }
    Ok(())
}

impl Ranker {
    /// Fails fast on invalid weights or blend, before any candidate is scored.
    pub fn new(config: RankerConfig) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&config.semantic_blend) {
            return Err(ConfigError::InvalidBlend(config.semantic_blend));
        }
        Ok(Self {
            aggregator: ScoreAggregator::new(config.weights)?,
            semantic_blend: config.semantic_blend,
        })
    }

    pub fn weights(&self) -> &ScoreWeights {
        self.aggregator.weights()
    }

    /// Ranks `candidates` against `job`, resolving "present" against the
    /// current time read once for the whole batch.
    pub fn rank<'a>(
        &self,
        job: &JobRequirement,
        candidates: &'a [CandidateProfile],
    ) -> Result<Ranking<'a>, RankingError> {
        self.rank_at(job, candidates, Utc::now())
    }

    /// Same as [`Ranker::rank`] with an explicit evaluation instant.
    pub fn rank_at<'a>(
        &self,
        job: &JobRequirement,
        candidates: &'a [CandidateProfile],
        now: DateTime<Utc>,
    ) -> Result<Ranking<'a>, RankingError> {
        validate_job(job)?;
        let contexts = vec![ScoringContext::keyword_only(now); candidates.len()];
        Ok(self.score_and_sort(job, candidates, &contexts, now))
    }

    /// Ranks with a semantic provider feeding the description dimension.
    ///
    /// Up to [`MAX_CONCURRENT_SIMILARITY_CALLS`] provider calls run at once;
    /// answers are collected in input order. A failed or invalid answer drops
    /// that candidate back to the keyword score.
    pub async fn rank_with_provider<'a>(
        &self,
        job: &JobRequirement,
        candidates: &'a [CandidateProfile],
        provider: &dyn SimilarityProvider,
        now: DateTime<Utc>,
    ) -> Result<Ranking<'a>, RankingError> {
        validate_job(job)?;

        let semantic_blend = self.semantic_blend;
        let contexts: Vec<ScoringContext> = stream::iter(0..candidates.len())
            .map(|index| {
                let candidate = &candidates[index];
                async move {
                    ScoringContext {
                        now,
                        semantic_similarity: semantic_score(job, candidate, provider).await,
                        semantic_blend,
                    }
                }
            })
            .buffered(MAX_CONCURRENT_SIMILARITY_CALLS)
            .collect()
            .await;

        Ok(self.score_and_sort(job, candidates, &contexts, now))
    }

    /// Scores a single candidate without ranking.
    pub fn score_one(
        &self,
        job: &JobRequirement,
        candidate: &CandidateProfile,
        now: DateTime<Utc>,
    ) -> Result<ScoringResult, RankingError> {
        validate_job(job)?;
        Ok(self
            .aggregator
            .score(job, candidate, &ScoringContext::keyword_only(now)))
    }

    fn score_and_sort<'a>(
        &self,
        job: &JobRequirement,
        candidates: &'a [CandidateProfile],
        contexts: &[ScoringContext],
        evaluated_at: DateTime<Utc>,
    ) -> Ranking<'a> {
        let ranking_id = Uuid::new_v4();
        let started = Instant::now();

        let mut ranked: Vec<RankedCandidate<'a>> = candidates
            .iter()
            .zip(contexts)
            .enumerate()
            .map(|(position, (candidate, ctx))| {
                let result = self.aggregator.score(job, candidate, ctx);
                debug!(
                    %ranking_id,
                    candidate_id = %candidate.id,
                    total_score = result.total_score,
                    "Scored candidate"
                );
                RankedCandidate {
                    position,
                    candidate,
                    result,
                }
            })
            .collect();

        // Stable sort: equal totals keep input order.
        ranked.sort_by(|a, b| {
            b.result
                .total_score
                .partial_cmp(&a.result.total_score)
                .unwrap_or(Ordering::Equal)
        });

        info!(
            %ranking_id,
            candidates = ranked.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Ranked candidates for '{}'",
            job.title
        );

        Ranking {
            ranking_id,
            evaluated_at,
            candidates: ranked,
        }
    }
}

/// Provider answer for one candidate, or `None` to keep the keyword score.
async fn semantic_score(
    job: &JobRequirement,
    candidate: &CandidateProfile,
    provider: &dyn SimilarityProvider,
) -> Option<f64> {
    let text = candidate_profile_text(candidate);
    let answer = match provider.similarity(&job.description, &text).await {
        Ok(score) => checked_score(score),
        Err(e) => Err(e),
    };
    match answer {
        Ok(score) => Some(score),
        Err(e) => {
            warn!(
                candidate_id = %candidate.id,
                backend = provider.backend(),
                "Semantic similarity failed, using keyword score: {e}"
            );
            None
        }
    }
}
