use anyhow::{Context, Result};

use crate::ranking::weights::ScoreWeights;
use crate::ranking::RankerConfig;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ranker: RankerConfig,
    /// Base URL of an external semantic-similarity service. Unset keeps the
    /// engine on keyword matching only.
    pub semantic_api_url: Option<String>,
    pub semantic_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScoreWeights::default();
        let weights = ScoreWeights {
            job_title: weight(&lookup, "WEIGHT_JOB_TITLE", defaults.job_title)?,
            job_description: weight(&lookup, "WEIGHT_JOB_DESCRIPTION", defaults.job_description)?,
            required_skills: weight(&lookup, "WEIGHT_REQUIRED_SKILLS", defaults.required_skills)?,
            preferred_skills: weight(&lookup, "WEIGHT_PREFERRED_SKILLS", defaults.preferred_skills)?,
            years_experience: weight(&lookup, "WEIGHT_YEARS_EXPERIENCE", defaults.years_experience)?,
            education: weight(&lookup, "WEIGHT_EDUCATION", defaults.education)?,
        };

        let semantic_blend = match lookup("SEMANTIC_BLEND") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("SEMANTIC_BLEND must be a number, got '{raw}'"))?,
            None => RankerConfig::default().semantic_blend,
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            ranker: RankerConfig {
                weights,
                semantic_blend,
            },
            semantic_api_url: non_empty(lookup("SEMANTIC_API_URL")),
            semantic_api_key: non_empty(lookup("SEMANTIC_API_KEY")),
        })
    }
}

fn weight<F>(lookup: &F, key: &str, default: f64) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number, got '{raw}'")),
        None => Ok(default),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8001);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.ranker, RankerConfig::default());
        assert!(config.semantic_api_url.is_none());
    }

    #[test]
    fn test_weight_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WEIGHT_REQUIRED_SKILLS", "0.30"),
            ("WEIGHT_PREFERRED_SKILLS", "0.05"),
        ]))
        .unwrap();
        assert_eq!(config.ranker.weights.required_skills, 0.30);
        assert_eq!(config.ranker.weights.preferred_skills, 0.05);
        assert_eq!(config.ranker.weights.education, 0.15);
    }

    #[test]
    fn test_non_numeric_weight_fails() {
        let err = Config::from_lookup(lookup_from(&[("WEIGHT_EDUCATION", "lots")])).unwrap_err();
        assert!(err.to_string().contains("WEIGHT_EDUCATION"));
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "http")])).is_err());
    }

    #[test]
    fn test_semantic_settings() {
        let config = Config::from_lookup(lookup_from(&[
            ("SEMANTIC_API_URL", "http://vectors:8080"),
            ("SEMANTIC_API_KEY", ""),
            ("SEMANTIC_BLEND", "0.5"),
        ]))
        .unwrap();
        assert_eq!(config.semantic_api_url.as_deref(), Some("http://vectors:8080"));
        assert!(config.semantic_api_key.is_none());
        assert_eq!(config.ranker.semantic_blend, 0.5);
    }
}
