use serde::{Deserialize, Serialize};

/// One position in a candidate's work history.
///
/// Dates are kept as the caller sent them (`"2019-03"`, `"Mar 2019"`, `"Present"`, ...);
/// parsing is fail-soft and lives in `ranking::experience`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

/// An already-parsed candidate record. Never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// Precomputed by whoever parsed the CV. When absent the engine derives it
    /// from `experience`.
    #[serde(default)]
    pub years_of_experience: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_deserializes_camel_case_history() {
        let json = r#"{
            "id": "c-1",
            "email": "ada@example.com",
            "full_name": "Ada Lovelace",
            "skills": ["Swift"],
            "experience": [{
                "title": "iOS Engineer",
                "company": "Acme",
                "startDate": "2019-01",
                "endDate": "Present",
                "description": "Shipped apps"
            }],
            "education": [{
                "degree": "BSc Computer Science",
                "institution": "MIT",
                "startDate": "2012",
                "endDate": "2016",
                "fieldOfStudy": "CS"
            }],
            "years_of_experience": 6.0
        }"#;

        let candidate: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.experience[0].start_date, "2019-01");
        assert_eq!(candidate.experience[0].end_date, "Present");
        assert_eq!(candidate.education[0].field_of_study.as_deref(), Some("CS"));
        assert_eq!(candidate.years_of_experience, Some(6.0));
    }

    #[test]
    fn test_minimal_candidate_defaults_collections() {
        let candidate: CandidateProfile = serde_json::from_str(r#"{"id": "c-2"}"#).unwrap();
        assert!(candidate.skills.is_empty());
        assert!(candidate.experience.is_empty());
        assert!(candidate.education.is_empty());
        assert!(candidate.years_of_experience.is_none());
    }
}
