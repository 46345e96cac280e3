//! Text Similarity Scorer: keyword-overlap similarity for titles and descriptions.
//!
//! Raw Jaccard on short titles under-rewards partial overlap, so both scores
//! are boosted and then capped at a perfect match.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::CandidateProfile;
use crate::ranking::keywords::extract_keywords;

pub const TITLE_BOOST: f64 = 1.5;
pub const DESCRIPTION_BOOST: f64 = 1.2;
/// Description keywords must be at least this long to count.
pub const DESCRIPTION_MIN_KEYWORD_LEN: usize = 4;

/// Best title match across a candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleMatch {
    /// Boosted and capped similarity in [0, 1].
    pub similarity: f64,
    pub raw_jaccard: f64,
    pub best_title: Option<String>,
    /// The job title reduced to no keywords, so no prior title was compared.
    pub blank_job_title: bool,
}

/// |a ∩ b| / |a ∪ b|, 0 when both are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Compares the job title with each prior title and keeps the best one.
///
/// Ties keep the earliest entry in the history.
pub fn title_similarity<'a, I>(job_title: &str, prior_titles: I) -> TitleMatch
where
    I: IntoIterator<Item = &'a str>,
{
    let job_keywords = extract_keywords(job_title);
    if job_keywords.is_empty() {
        return TitleMatch {
            blank_job_title: true,
            ..TitleMatch::default()
        };
    }

    let mut best = TitleMatch::default();
    for title in prior_titles {
        let prior_keywords = extract_keywords(title);
        if prior_keywords.is_empty() {
            continue;
        }
        let raw = jaccard(&job_keywords, &prior_keywords);
        if best.best_title.is_none() || raw > best.raw_jaccard {
            best.raw_jaccard = raw;
            best.best_title = Some(title.trim().to_string());
        }
    }

    best.similarity = (best.raw_jaccard * TITLE_BOOST).min(1.0);
    best
}

/// Concatenates everything a candidate wrote about themselves, lowercased.
pub fn candidate_profile_text(candidate: &CandidateProfile) -> String {
    let mut parts: Vec<&str> = candidate.skills.iter().map(String::as_str).collect();
    for entry in &candidate.experience {
        parts.push(&entry.title);
        parts.push(&entry.description);
    }
    for entry in &candidate.education {
        parts.push(&entry.degree);
    }
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Job-description keywords long enough to be meaningful for description matching.
pub fn description_keywords(job_description: &str) -> BTreeSet<String> {
    extract_keywords(job_description)
        .into_iter()
        .filter(|k| k.chars().count() >= DESCRIPTION_MIN_KEYWORD_LEN)
        .collect()
}

/// Share of job-description keywords found in `candidate_text`, boosted and
/// capped at 1.0. A keyword counts when it occurs as a substring.
pub fn description_similarity(job_description: &str, candidate_text: &str) -> f64 {
    let keywords = description_keywords(job_description);
    if keywords.is_empty() {
        return 0.0;
    }

    let haystack = candidate_text.to_lowercase();
    let matched = keywords.iter().filter(|k| haystack.contains(k.as_str())).count();

    (matched as f64 / keywords.len() as f64 * DESCRIPTION_BOOST).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry};

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_jaccard_basic() {
        let j = jaccard(&set(&["a1", "b1", "c1"]), &set(&["b1", "c1", "d1"]));
        assert!((j - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        assert_eq!(jaccard(&BTreeSet::new(), &BTreeSet::new()), 0.0);
    }

    #[test]
    fn test_title_similarity_picks_best_prior_title() {
        let m = title_similarity(
            "Senior iOS Developer",
            ["iOS Engineer", "Mobile Developer"],
        );
        // {senior, ios, developer} vs {ios, engineer} = 1/4; vs {mobile, developer} = 1/4.
        // Tie keeps the first entry.
        assert!((m.raw_jaccard - 0.25).abs() < 1e-9);
        assert!((m.similarity - 0.375).abs() < 1e-9);
        assert_eq!(m.best_title.as_deref(), Some("iOS Engineer"));
    }

    #[test]
    fn test_title_similarity_boost_is_capped() {
        let m = title_similarity("Data Engineer", ["data engineer"]);
        assert!((m.raw_jaccard - 1.0).abs() < 1e-9);
        assert!((m.similarity - 1.0).abs() < 1e-9);

        let m = title_similarity("Senior Data Engineer", ["Data Engineer"]);
        // 2/3 * 1.5 = 1.0
        assert!((m.similarity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_title_similarity_no_history_is_zero() {
        let m = title_similarity("Backend Engineer", std::iter::empty::<&str>());
        assert_eq!(m.similarity, 0.0);
        assert!(m.best_title.is_none());
    }

    #[test]
    fn test_title_similarity_empty_job_title_is_zero() {
        let m = title_similarity("", ["Backend Engineer"]);
        assert_eq!(m.similarity, 0.0);
        assert!(m.blank_job_title);

        let m = title_similarity("The and of", ["Backend Engineer"]);
        assert!(m.blank_job_title);
        assert!(m.best_title.is_none());

        assert!(!title_similarity("Backend Engineer", ["Chef"]).blank_job_title);
    }

    #[test]
    fn test_description_similarity_counts_substrings() {
        let score = description_similarity(
            "Build scalable backend services",
            "rust backend engineer building scalable services",
        );
        // keywords: build, scalable, backend, services → all 4 present ("build" ⊂ "building")
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_description_similarity_partial_with_boost() {
        let score = description_similarity(
            "Kubernetes Terraform Python Golang Go",
            "python golang",
        );
        // keywords ≥ 4 chars: kubernetes, terraform, python, golang → 2/4 * 1.2
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_description_without_keywords_is_zero() {
        assert_eq!(description_similarity("", "anything"), 0.0);
        assert_eq!(description_similarity("a an the to", "anything"), 0.0);
    }

    #[test]
    fn test_candidate_profile_text_includes_all_sources() {
        let candidate = CandidateProfile {
            id: "c".to_string(),
            skills: vec!["Swift".to_string()],
            experience: vec![ExperienceEntry {
                title: "iOS Engineer".to_string(),
                description: "Built Banking App".to_string(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                degree: "Bachelor of Science".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(
            candidate_profile_text(&candidate),
            "swift ios engineer built banking app bachelor of science"
        );
    }
}
