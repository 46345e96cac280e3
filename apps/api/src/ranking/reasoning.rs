//! Reasoning Generator: renders a `ScoringResult` as one deterministic sentence
//! per dimension.

use crate::ranking::aggregator::{DescriptionBackend, ScoringResult};
use crate::ranking::skills::SkillMatch;

/// Renders the breakdown in fixed order: title, description, required skills,
/// preferred skills, years, education. Preferred skills are skipped when the
/// job lists none.
///
/// Reads only `scores` and `breakdown`, never the stored `reasoning`, so it can
/// be re-run on any result.
pub fn render_reasoning(result: &ScoringResult) -> String {
    let scores = &result.scores;
    let b = &result.breakdown;
    let mut parts = Vec::with_capacity(6);

    parts.push(match &b.best_title {
        Some(title) => format!(
            "Job title match: {:.0}% (closest: \"{title}\")",
            scores.job_title
        ),
        None if b.blank_job_title => {
            format!("Job title match: {:.0}% (no job title to compare)", scores.job_title)
        }
        None => format!("Job title match: {:.0}% (no prior titles)", scores.job_title),
    });

    parts.push(match b.description_backend {
        DescriptionBackend::Keyword => {
            format!("description match: {:.0}%", scores.job_description)
        }
        DescriptionBackend::Semantic => {
            format!("description match: {:.0}% (semantic)", scores.job_description)
        }
    });

    parts.push(skill_fragment(&b.required_skills, "required", scores.required_skills));
    if b.preferred_skills.total > 0 {
        parts.push(skill_fragment(
            &b.preferred_skills,
            "preferred",
            scores.preferred_skills,
        ));
    }

    parts.push(if b.required_years > 0.0 {
        format!(
            "{}yrs experience (required: {}yrs, {:.0}%)",
            b.candidate_years, b.required_years, scores.years_experience
        )
    } else {
        format!("{} years of experience", b.candidate_years)
    });

    parts.push(match b.required_education {
        Some(required) => format!(
            "education: {} (required: {}, {:.0}%)",
            b.candidate_education, required, scores.education
        ),
        None => format!(
            "education: {} (no requirement, {:.0}%)",
            b.candidate_education, scores.education
        ),
    });

    parts.join(". ") + "."
}

fn skill_fragment(m: &SkillMatch, label: &str, pct: f64) -> String {
    format!("{}/{} {label} skills ({pct:.0}%)", m.matched_count, m.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::aggregator::{DimensionScores, ScoreBreakdown};
    use crate::ranking::education::EducationLevel;

    fn skill_match(matched: usize, total: usize) -> SkillMatch {
        SkillMatch {
            matched_count: matched,
            total,
            matched: Vec::new(),
        }
    }

    fn sample_result() -> ScoringResult {
        ScoringResult {
            scores: DimensionScores {
                job_title: 37.5,
                job_description: 72.0,
                required_skills: 60.0,
                preferred_skills: 200.0 / 3.0,
                years_experience: 100.0,
                education: 100.0,
            },
            total_score: 0.0,
            breakdown: ScoreBreakdown {
                best_title: Some("iOS Engineer".to_string()),
                required_skills: skill_match(3, 5),
                preferred_skills: skill_match(2, 3),
                candidate_years: 6.0,
                required_years: 5.0,
                candidate_education: EducationLevel::Bachelor,
                required_education: Some(EducationLevel::Bachelor),
                ..Default::default()
            },
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_renders_all_dimensions_in_order() {
        assert_eq!(
            render_reasoning(&sample_result()),
            "Job title match: 38% (closest: \"iOS Engineer\"). \
             description match: 72%. \
             3/5 required skills (60%). \
             2/3 preferred skills (67%). \
             6yrs experience (required: 5yrs, 100%). \
             education: bachelor (required: bachelor, 100%)."
        );
    }

    #[test]
    fn test_omits_preferred_skills_when_job_lists_none() {
        let mut result = sample_result();
        result.breakdown.preferred_skills = skill_match(0, 0);
        result.scores.preferred_skills = 0.0;
        let text = render_reasoning(&result);
        assert!(!text.contains("preferred"), "{text}");
    }

    #[test]
    fn test_no_minimum_years_and_no_education_requirement() {
        let mut result = sample_result();
        result.breakdown.required_years = 0.0;
        result.breakdown.candidate_years = 2.5;
        result.breakdown.required_education = None;
        let text = render_reasoning(&result);
        assert!(text.contains("2.5 years of experience"), "{text}");
        assert!(text.contains("education: bachelor (no requirement, 100%)"), "{text}");
    }

    #[test]
    fn test_no_prior_titles_and_semantic_backend() {
        let mut result = sample_result();
        result.breakdown.best_title = None;
        result.scores.job_title = 0.0;
        result.breakdown.description_backend = DescriptionBackend::Semantic;
        let text = render_reasoning(&result);
        assert!(text.starts_with("Job title match: 0% (no prior titles). description match: 72% (semantic)."));
    }

    #[test]
    fn test_blank_job_title_is_not_reported_as_missing_history() {
        let mut result = sample_result();
        result.breakdown.best_title = None;
        result.breakdown.blank_job_title = true;
        result.scores.job_title = 0.0;
        let text = render_reasoning(&result);
        assert!(text.starts_with("Job title match: 0% (no job title to compare)."), "{text}");
        assert!(!text.contains("no prior titles"), "{text}");
    }

    #[test]
    fn test_is_pure() {
        let result = sample_result();
        let first = render_reasoning(&result);
        let second = render_reasoning(&result);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}
