//! Education Evaluator: ordinal degree levels and near-miss partial credit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::EducationEntry;

/// Ordered from lowest to highest; the derived `Ord` is the level ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    Unrecognized,
    Certificate,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

/// Case-insensitive substring table, checked highest level first.
const LEVEL_KEYWORDS: &[(EducationLevel, &[&str])] = &[
    (EducationLevel::Doctorate, &["phd", "doctorate"]),
    (EducationLevel::Master, &["master", "mba"]),
    (EducationLevel::Bachelor, &["bachelor"]),
    (EducationLevel::Associate, &["associate"]),
    (EducationLevel::Certificate, &["diploma", "certificate"]),
];

pub const SCORE_MET: f64 = 100.0;
pub const SCORE_ONE_BELOW: f64 = 70.0;
/// Floor credit for any shortfall larger than one level.
pub const SCORE_FLOOR: f64 = 40.0;

impl EducationLevel {
    /// Classifies free text; the highest matching level wins.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        LEVEL_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map(|(level, _)| *level)
            .unwrap_or_default()
    }

    /// Highest level across all entries, `Unrecognized` for an empty history.
    pub fn highest(entries: &[EducationEntry]) -> Self {
        entries
            .iter()
            .map(|e| Self::classify(&e.degree))
            .max()
            .unwrap_or_default()
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Unrecognized => "unrecognized",
            EducationLevel::Certificate => "certificate",
            EducationLevel::Associate => "associate",
            EducationLevel::Bachelor => "bachelor",
            EducationLevel::Master => "master",
            EducationLevel::Doctorate => "doctorate",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Education dimension inputs and score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EducationScore {
    pub score: f64,
    pub candidate_level: EducationLevel,
    /// `None` when the job has no education requirement.
    pub required_level: Option<EducationLevel>,
}

pub fn score_levels(candidate: EducationLevel, required: EducationLevel) -> f64 {
    if candidate >= required {
        SCORE_MET
    } else if candidate.rank() + 1 == required.rank() {
        SCORE_ONE_BELOW
    } else {
        SCORE_FLOOR
    }
}

/// Scores a candidate's education against the job's free-text requirement.
/// A blank requirement always scores 100.
pub fn score_education(entries: &[EducationEntry], required_education: &str) -> EducationScore {
    let candidate_level = EducationLevel::highest(entries);

    if required_education.trim().is_empty() {
        return EducationScore {
            score: SCORE_MET,
            candidate_level,
            required_level: None,
        };
    }

    let required_level = EducationLevel::classify(required_education);
    EducationScore {
        score: score_levels(candidate_level, required_level),
        candidate_level,
        required_level: Some(required_level),
    }
}
