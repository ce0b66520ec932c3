//! Repository interfaces. Handlers only see these traits; `AppState` carries
//! them as `Arc<dyn ...>` so PostgreSQL and the in-memory store are
//! interchangeable.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::assessment::AssessmentResult;
use crate::models::cv::CandidateCv;
use crate::models::decision::HiringDecision;
use crate::models::job::Job;
use crate::models::user::User;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Duplicate(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] when the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn insert_job(&self, job: &Job) -> Result<(), StoreError>;
    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, StoreError>;
    /// Newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;
    /// Removes the job with its CVs, assessments and decisions. Returns false if absent.
    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] when the applicant already applied to the job.
    async fn insert_cv(&self, cv: &CandidateCv) -> Result<(), StoreError>;
    async fn find_cv(&self, id: Uuid) -> Result<Option<CandidateCv>, StoreError>;
    /// Oldest submission first.
    async fn list_cvs_for_job(&self, job_id: Uuid) -> Result<Vec<CandidateCv>, StoreError>;
}

#[async_trait]
pub trait AssessmentStore: Send + Sync {
    async fn insert_assessment(&self, result: &AssessmentResult) -> Result<(), StoreError>;
    /// Most recent result for the CV, if any.
    async fn latest_assessment(&self, cv_id: Uuid)
        -> Result<Option<AssessmentResult>, StoreError>;
}

#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Inserts or replaces the decision for `decision.cv_id`.
    async fn upsert_decision(&self, decision: &HiringDecision) -> Result<(), StoreError>;
    async fn find_decision(&self, cv_id: Uuid) -> Result<Option<HiringDecision>, StoreError>;
    async fn list_decisions_for_job(&self, job_id: Uuid)
        -> Result<Vec<HiringDecision>, StoreError>;
}
