//! Score Aggregator: computes the six dimension scores for one candidate and
//! combines them with the configured weights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CandidateProfile, JobRequirement};
use crate::ranking::education::{score_education, EducationLevel};
use crate::ranking::experience::{derive_years_of_experience, score_years};
use crate::ranking::reasoning::render_reasoning;
use crate::ranking::skills::{match_skills, SkillMatch};
use crate::ranking::text_similarity::{
    candidate_profile_text, description_similarity, title_similarity,
};
use crate::ranking::weights::{ConfigError, ScoreWeights};

/// Share of the legacy combined skills score taken by required skills.
const LEGACY_REQUIRED_SHARE: f64 = 0.7;
const LEGACY_PREFERRED_SHARE: f64 = 0.3;

/// Per-dimension scores in percentage units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub job_title: f64,
    pub job_description: f64,
    pub required_skills: f64,
    pub preferred_skills: f64,
    pub years_experience: f64,
    pub education: f64,
}

impl DimensionScores {
    pub fn weighted_total(&self, weights: &ScoreWeights) -> f64 {
        self.job_title * weights.job_title
            + self.job_description * weights.job_description
            + self.required_skills * weights.required_skills
            + self.preferred_skills * weights.preferred_skills
            + self.years_experience * weights.years_experience
            + self.education * weights.education
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionBackend {
    #[default]
    Keyword,
    Semantic,
}

/// Raw ingredients behind the dimension scores, kept for the reasoning text
/// and for callers that want to show their own explanation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub best_title: Option<String>,
    pub title_jaccard: f64,
    /// Job title had no keywords to compare.
    pub blank_job_title: bool,
    pub description_backend: DescriptionBackend,
    /// Keyword-overlap similarity in [0, 1]; always computed.
    pub keyword_description_similarity: f64,
    /// Provider similarity in [0, 1] when a semantic provider answered.
    pub semantic_description_similarity: Option<f64>,
    pub required_skills: SkillMatch,
    pub preferred_skills: SkillMatch,
    /// Years actually scored: the precomputed value when given, else `derived_years`.
    pub candidate_years: f64,
    pub derived_years: f64,
    pub required_years: f64,
    /// Uncapped candidate/required ratio; `None` without a minimum.
    pub years_ratio: Option<f64>,
    pub candidate_education: EducationLevel,
    pub required_education: Option<EducationLevel>,
    /// `required × 0.7 + preferred × 0.3`, kept for older consumers.
    pub legacy_skills_score: f64,
}

/// Output for one candidate. Built fresh per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub scores: DimensionScores,
    /// Weighted sum; not clamped.
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub reasoning: String,
}

/// Everything about a single evaluation that is not part of the inputs.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    /// Resolves "present" end dates. Shared by every candidate of a batch.
    pub now: DateTime<Utc>,
    /// Provider answer for this candidate, if one was consulted.
    pub semantic_similarity: Option<f64>,
    /// Weight of `semantic_similarity` against the keyword score, in [0, 1].
    pub semantic_blend: f64,
}

impl ScoringContext {
    pub fn keyword_only(now: DateTime<Utc>) -> Self {
        Self {
            now,
            semantic_similarity: None,
            semantic_blend: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights) -> Result<Self, ConfigError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Scores one candidate. Pure: the same inputs and context always produce
    /// the same result.
    pub fn score(
        &self,
        job: &JobRequirement,
        candidate: &CandidateProfile,
        ctx: &ScoringContext,
    ) -> ScoringResult {
        let title = title_similarity(
            &job.title,
            candidate.experience.iter().map(|e| e.title.as_str()),
        );

        let keyword_description =
            description_similarity(&job.description, &candidate_profile_text(candidate));
        let (description, description_backend) = match ctx.semantic_similarity {
            Some(semantic) => {
                let semantic = semantic.clamp(0.0, 1.0);
                let blend = ctx.semantic_blend.clamp(0.0, 1.0);
                (
                    keyword_description * (1.0 - blend) + semantic * blend,
                    DescriptionBackend::Semantic,
                )
            }
            None => (keyword_description, DescriptionBackend::Keyword),
        };

        let required_skills = match_skills(&candidate.skills, &job.required_skills);
        let preferred_skills = match_skills(&candidate.skills, &job.preferred_skills);

        let derived_years = derive_years_of_experience(&candidate.experience, ctx.now);
        let candidate_years = candidate
            .years_of_experience
            .filter(|y| y.is_finite() && *y >= 0.0)
            .unwrap_or(derived_years);
        let years = score_years(candidate_years, job.min_years_experience);

        let education = score_education(&candidate.education, &job.required_education);

        let scores = DimensionScores {
            job_title: title.similarity * 100.0,
            job_description: description * 100.0,
            required_skills: required_skills.percentage(),
            preferred_skills: preferred_skills.percentage(),
            years_experience: years.score,
            education: education.score,
        };

        let breakdown = ScoreBreakdown {
            best_title: title.best_title,
            title_jaccard: title.raw_jaccard,
            blank_job_title: title.blank_job_title,
            description_backend,
            keyword_description_similarity: keyword_description,
            semantic_description_similarity: ctx.semantic_similarity.map(|s| s.clamp(0.0, 1.0)),
            legacy_skills_score: scores.required_skills * LEGACY_REQUIRED_SHARE
                + scores.preferred_skills * LEGACY_PREFERRED_SHARE,
            required_skills,
            preferred_skills,
            candidate_years,
            derived_years,
            required_years: job.min_years_experience,
            years_ratio: years.ratio,
            candidate_education: education.candidate_level,
            required_education: education.required_level,
        };

        let mut result = ScoringResult {
            total_score: scores.weighted_total(&self.weights),
            scores,
            breakdown,
            reasoning: String::new(),
        };
        result.reasoning = render_reasoning(&result);
        result
    }
}
