//! Axum route handlers for the Ranking API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CandidateProfile, JobRequirement};
use crate::ranking::aggregator::ScoringResult;
use crate::ranking::keywords::extract_keywords;
use crate::ranking::ranker::{validate_job, Ranking};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub job_requirements: JobRequirement,
    #[serde(default)]
    pub candidates: Vec<CandidateProfile>,
}

#[derive(Debug, Serialize)]
pub struct RankedCandidateResponse {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Index of the candidate in the request's `candidates` array.
    pub position: usize,
    /// `total_score` rounded to two decimals.
    pub score: f64,
    pub scoring_details: ScoringResult,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub ranking_id: Uuid,
    pub ranked_candidates: Vec<RankedCandidateResponse>,
    pub evaluated_at: DateTime<Utc>,
    pub description_backend: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub job_requirements: JobRequirement,
    pub candidate: CandidateProfile,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub id: String,
    pub score: f64,
    pub scoring_details: ScoringResult,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_response(ranking: Ranking<'_>) -> RankResponse {
    let ranked_candidates = ranking
        .candidates
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankedCandidateResponse {
            id: r.candidate.id.clone(),
            email: r.candidate.email.clone(),
            full_name: r.candidate.full_name.clone(),
            rank: i + 1,
            position: r.position,
            score: round2(r.result.total_score),
            scoring_details: r.result,
        })
        .collect();

    RankResponse {
        ranking_id: ranking.ranking_id,
        ranked_candidates,
        evaluated_at: ranking.evaluated_at,
        description_backend: String::new(),
    }
}

fn join_error(e: tokio::task::JoinError) -> AppError {
    AppError::Internal(e.into())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rank
///
/// Scores every candidate against the job and returns them best-first.
/// Equal scores keep their request order.
///
/// Keyword batches run on the blocking pool; a semantic backend keeps the
/// batch on the async path because candidates await the provider.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let RankRequest {
        job_requirements: job,
        candidates,
    } = request;
    validate_job(&job)?;

    let mut response = if state.similarity.is_semantic() {
        let ranking = state
            .ranker
            .rank_with_provider(&job, &candidates, state.similarity.as_ref(), Utc::now())
            .await?;
        to_response(ranking)
    } else {
        let ranker = state.ranker.clone();
        tokio::task::spawn_blocking(move || ranker.rank(&job, &candidates).map(to_response))
            .await
            .map_err(join_error)??
    };

    response.description_backend = state.description_backend().to_string();
    Ok(Json(response))
}

/// POST /api/v1/score
///
/// Full breakdown for a single candidate, without ranking.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let ScoreRequest {
        job_requirements: job,
        candidate,
    } = request;
    validate_job(&job)?;
    let id = candidate.id.clone();
    let now = Utc::now();

    let scoring_details = if state.similarity.is_semantic() {
        state
            .ranker
            .rank_with_provider(
                &job,
                std::slice::from_ref(&candidate),
                state.similarity.as_ref(),
                now,
            )
            .await?
            .candidates
            .pop()
            .map(|ranked| ranked.result)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("scoring produced no result")))?
    } else {
        let ranker = state.ranker.clone();
        tokio::task::spawn_blocking(move || ranker.score_one(&job, &candidate, now))
            .await
            .map_err(join_error)??
    };

    Ok(Json(ScoreResponse {
        id,
        score: round2(scoring_details.total_score),
        scoring_details,
        evaluated_at: now,
    }))
}

/// POST /api/v1/keywords
///
/// Previews the keyword set the engine extracts from a piece of text.
pub async fn handle_keywords(
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    Ok(Json(KeywordsResponse {
        keywords: extract_keywords(&request.text).into_iter().collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.66666), 66.67);
        assert_eq!(round2(60.0), 60.0);
        assert_eq!(round2(12.344), 12.34);
    }
}
