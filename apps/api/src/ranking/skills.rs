//! Skill Matcher: exact, case-insensitive set intersection.
//!
//! Known limitation: no stemming or fuzzy matching, so "REST API" and
//! "RESTful APIs" are different skills.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

/// Outcome of matching a candidate's skills against one target list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched_count: usize,
    pub total: usize,
    /// Matched target skills in the job's spelling, sorted case-insensitively.
    pub matched: Vec<String>,
}

impl SkillMatch {
    /// Percentage of targets matched; 0 when there were no targets.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.matched_count as f64 / self.total as f64 * 100.0
    }
}

pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Matches `candidate_skills` against `target_skills`.
///
/// Targets that collapse to the same normalized form are counted once, and
/// blank targets are ignored.
pub fn match_skills(candidate_skills: &[String], target_skills: &[String]) -> SkillMatch {
    let have: HashSet<String> = candidate_skills.iter().map(|s| normalize_skill(s)).collect();

    let mut seen = BTreeSet::new();
    let mut matched = Vec::new();

    for target in target_skills {
        let key = normalize_skill(target);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        if have.contains(&key) {
            matched.push(target.trim().to_string());
        }
    }

    matched.sort_by_key(|s| s.to_lowercase());

    SkillMatch {
        matched_count: matched.len(),
        total: seen.len(),
        matched,
    }
}
