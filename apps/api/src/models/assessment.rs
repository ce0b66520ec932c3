use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::required;

/// Result of a personality test taken for a submitted CV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AssessmentResult {
    pub id: Uuid,
    pub cv_id: Uuid,
    pub trait_name: String,
    pub score: f64,
    pub taken_at: DateTime<Utc>,
}

impl AssessmentResult {
    pub fn record(cv_id: Uuid, trait_name: &str, score: f64) -> Result<Self, AppError> {
        Ok(Self {
            id: Uuid::new_v4(),
            cv_id,
            trait_name: required("trait_name", trait_name)?,
            score: validate_score("score", score)?,
            taken_at: Utc::now(),
        })
    }
}

/// Accepts finite values in 0..=100.
pub fn validate_score(field: &str, value: f64) -> Result<f64, AppError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{field} must be between 0 and 100"
        )))
    }
}
