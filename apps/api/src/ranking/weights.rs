use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed drift of the weight sum from 1.0.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("weight '{name}' must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("dimension weights must sum to 1.0 (got {sum})")]
    WeightSum { sum: f64 },

    #[error("semantic blend must be within [0, 1] (got {0})")]
    InvalidBlend(f64),
}

/// Per-dimension weights used by the aggregator. Immutable once a `Ranker` is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub job_title: f64,
    pub job_description: f64,
    pub required_skills: f64,
    pub preferred_skills: f64,
    pub years_experience: f64,
    pub education: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            job_title: 0.15,
            job_description: 0.15,
            required_skills: 0.25,
            preferred_skills: 0.10,
            years_experience: 0.20,
            education: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Weights in reasoning order, paired with their config names.
    pub fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("job_title", self.job_title),
            ("job_description", self.job_description),
            ("required_skills", self.required_skills),
            ("preferred_skills", self.preferred_skills),
            ("years_experience", self.years_experience),
            ("education", self.education),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.named().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }
}
