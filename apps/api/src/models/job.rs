use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{clean_list, optional, required};

/// A job posting. `experience` is free text such as "3+ years"; the
/// screening heuristic reads the leading year count out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
}

impl Job {
    /// Validates a posting request and stamps it with a fresh id.
    pub fn create(request: JobRequest, created_by: Uuid) -> Result<Self, AppError> {
        Ok(Self {
            id: Uuid::new_v4(),
            title: required("title", &request.title)?,
            description: request.description.trim().to_string(),
            skills: clean_list(request.skills),
            experience: optional(request.experience),
            education: optional(request.education),
            location: optional(request.location),
            created_by,
            created_at: Utc::now(),
        })
    }
}
