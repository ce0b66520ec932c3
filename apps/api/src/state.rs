use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::assessment::client::PersonalityClient;
use crate::config::Config;
use crate::store::{AssessmentStore, CandidateStore, DecisionStore, JobStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jobs: Arc<dyn JobStore>,
    pub cvs: Arc<dyn CandidateStore>,
    pub assessments: Arc<dyn AssessmentStore>,
    pub decisions: Arc<dyn DecisionStore>,
    /// Present only when PERSONALITY_API_URL is configured.
    pub personality: Option<PersonalityClient>,
    pub config: Config,
    /// Hash checked when a login names no known account, at the configured cost.
    pub login_decoy_hash: Arc<str>,
}

impl AppState {
    /// Wires every store seam to the same backing store.
    pub fn from_store<S>(store: Arc<S>, config: Config) -> Result<Self>
    where
        S: UserStore + JobStore + CandidateStore + AssessmentStore + DecisionStore + 'static,
    {
        let personality = config
            .personality_api_url
            .clone()
            .map(PersonalityClient::new);
        let login_decoy_hash = bcrypt::hash(Uuid::new_v4().to_string(), config.bcrypt_cost)
            .context("failed to prepare login decoy hash")?;

        Ok(Self {
            users: store.clone(),
            jobs: store.clone(),
            cvs: store.clone(),
            assessments: store.clone(),
            decisions: store,
            personality,
            config,
            login_decoy_hash: login_decoy_hash.into(),
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::store::MemoryStore;

    pub fn test_config() -> Config {
        Config {
            database_url: "memory://".to_string(),
            jwt_secret: "test-secret".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            token_ttl_days: 7,
            bcrypt_cost: 4,
            personality_api_url: None,
            cors_origins: vec![],
        }
    }

    pub fn test_state() -> AppState {
        AppState::from_store(Arc::new(MemoryStore::new()), test_config()).unwrap()
    }
}
