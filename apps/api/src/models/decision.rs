use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::optional;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hire,
    Reject,
    Hold,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Hire => "hire",
            Decision::Reject => "reject",
            Decision::Hold => "hold",
        }
    }
}

impl FromStr for Decision {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hire" => Ok(Decision::Hire),
            "reject" => Ok(Decision::Reject),
            "hold" => Ok(Decision::Hold),
            other => Err(AppError::Validation(format!(
                "decision must be one of hire, reject, hold (got '{other}')"
            ))),
        }
    }
}

/// The latest hiring decision on a CV. One per CV; recording again replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiringDecision {
    pub id: Uuid,
    pub cv_id: Uuid,
    pub job_id: Uuid,
    pub decision: Decision,
    pub notes: Option<String>,
    pub decided_by: Uuid,
    pub decided_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub decision: Decision,
    pub notes: Option<String>,
}

impl HiringDecision {
    pub fn new(request: DecisionRequest, cv_id: Uuid, job_id: Uuid, decided_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            cv_id,
            job_id,
            decision: request.decision,
            notes: optional(request.notes),
            decided_by,
            decided_at: Utc::now(),
        }
    }
}
