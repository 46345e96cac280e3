//! Similarity Client: HTTP client for an external semantic-similarity service.
//!
//! Wire contract: `POST {base_url}/similarity` with `{"text_a", "text_b"}`,
//! answering `{"score": <0..1>}`. Bearer auth when a key is configured.
//!
//! Retries 429 and 5xx with exponential backoff; any other failure is returned
//! so the ranker can fall back to keyword matching.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ranking::similarity::{checked_score, SimilarityError, SimilarityProvider};

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    text_a: &'a str,
    text_b: &'a str,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    score: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct RemoteSimilarity {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteSimilarity {
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self, SimilarityError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/similarity", self.base_url)
    }

    async fn call(&self, job_text: &str, candidate_text: &str) -> Result<f64, SimilarityError> {
        let body = SimilarityRequest {
            text_a: job_text,
            text_b: candidate_text,
        };

        let mut last_error: Option<SimilarityError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s, 2s ...
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Similarity call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.client.post(self.endpoint()).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) if e.is_timeout() || e.is_connect() => {
                    last_error = Some(SimilarityError::Http(e));
                    continue;
                }
                Err(e) => return Err(SimilarityError::Http(e)),
            };

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                last_error = Some(SimilarityError::Provider {
                    status: status.as_u16(),
                    message: provider_message(response).await,
                });
                continue;
            }

            if !status.is_success() {
                return Err(SimilarityError::Provider {
                    status: status.as_u16(),
                    message: provider_message(response).await,
                });
            }

            let parsed: SimilarityResponse = response.json().await?;
            debug!(score = parsed.score, "Similarity provider answered");
            return checked_score(parsed.score);
        }

        Err(last_error.unwrap_or(SimilarityError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }
}

async fn provider_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ProviderError>(&text) {
        Ok(ProviderError {
            error: Some(msg), ..
        })
        | Ok(ProviderError {
            message: Some(msg), ..
        }) => msg,
        _ => text,
    }
}

#[async_trait]
impl SimilarityProvider for RemoteSimilarity {
    fn backend(&self) -> &'static str {
        "remote"
    }

    async fn similarity(
        &self,
        job_text: &str,
        candidate_text: &str,
    ) -> Result<f64, SimilarityError> {
        self.call(job_text, candidate_text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = RemoteSimilarity::new("http://localhost:9000/".to_string(), None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/similarity");
        assert_eq!(client.backend(), "remote");
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let body = SimilarityRequest {
            text_a: "job",
            text_b: "candidate",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"text_a": "job", "text_b": "candidate"}));
    }

    #[test]
    fn test_response_deserializes_score() {
        let parsed: SimilarityResponse = serde_json::from_str(r#"{"score": 0.42}"#).unwrap();
        assert!((parsed.score - 0.42).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unreachable_provider_returns_error() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let client = RemoteSimilarity::new("http://127.0.0.1:9".to_string(), None).unwrap();
        let result = client.similarity("a", "b").await;
        assert!(result.is_err());
    }
}
