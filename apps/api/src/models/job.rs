use serde::{Deserialize, Serialize};

/// A job requisition that every candidate in a batch is scored against.
///
/// Built by the caller per ranking request and only ever borrowed by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub min_years_experience: f64,
    #[serde(default)]
    pub required_education: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_default_when_missing() {
        let json = r#"{
            "title": "Backend Engineer",
            "description": "Build services",
            "required_skills": ["Rust"]
        }"#;

        let job: JobRequirement = serde_json::from_str(json).unwrap();
        assert!(job.preferred_skills.is_empty());
        assert_eq!(job.min_years_experience, 0.0);
        assert!(job.required_education.is_empty());
    }
}
