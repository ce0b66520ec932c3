//! Client for the external personality-test scoring API.
//!
//! The API is a black box: we post the raw answers and get back a trait name
//! and a 0–100 score. One attempt per call, no retries.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum PersonalityApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),
}

impl From<PersonalityApiError> for AppError {
    fn from(err: PersonalityApiError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    answers: &'a [Value],
}

/// What the scoring API returns for a completed test.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredTrait {
    #[serde(alias = "trait", alias = "traitName")]
    pub trait_name: String,
    pub score: f64,
}

#[derive(Clone)]
pub struct PersonalityClient {
    client: Client,
    endpoint: String,
}

impl PersonalityClient {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits test answers and returns the scored trait.
    pub async fn score(&self, answers: &[Value]) -> Result<ScoredTrait, PersonalityApiError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest { answers })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Personality API returned {status}");
            return Err(PersonalityApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let scored: ScoredTrait = response.json().await?;
        if !scored.score.is_finite() || !(0.0..=100.0).contains(&scored.score) {
            return Err(PersonalityApiError::ScoreOutOfRange(scored.score));
        }

        debug!("Personality API scored trait {}", scored.trait_name);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_trait_accepts_aliases() {
        let a: ScoredTrait =
            serde_json::from_str(r#"{"trait":"Openness","score":71.5}"#).unwrap();
        let b: ScoredTrait =
            serde_json::from_str(r#"{"traitName":"Openness","score":71.5}"#).unwrap();
        let c: ScoredTrait =
            serde_json::from_str(r#"{"trait_name":"Openness","score":71.5}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_api_error_maps_to_upstream() {
        let err = AppError::from(PersonalityApiError::Api {
            status: 503,
            message: "down".into(),
        });
        assert!(matches!(err, AppError::Upstream(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = PersonalityClient::new("http://127.0.0.1:9/score".to_string());
        let err = client.score(&[]).await.unwrap_err();
        assert!(matches!(err, PersonalityApiError::Http(_)));
    }
}
