use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use crate::models::assessment::AssessmentResult;
use crate::models::cv::{CandidateCv, WorkHistoryEntry};
use crate::models::decision::{Decision, HiringDecision};
use crate::models::job::Job;
use crate::models::user::{Role, User};
use crate::store::{
    AssessmentStore, CandidateStore, DecisionStore, JobStore, StoreError, UserStore,
};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row types (text-encoded enums and JSONB columns)
// ────────────────────────────────────────────────────────────────────────────

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|_| {
            StoreError::Database(sqlx::Error::Decode(
                format!("unknown role '{}' for user {}", row.role, row.id).into(),
            ))
        })?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct CvRow {
    id: Uuid,
    job_id: Uuid,
    applicant_id: Uuid,
    applicant_name: String,
    email: String,
    skills: Vec<String>,
    experience: Option<String>,
    education: Option<String>,
    work_history: Json<Vec<WorkHistoryEntry>>,
    submitted_at: DateTime<Utc>,
}

impl From<CvRow> for CandidateCv {
    fn from(row: CvRow) -> Self {
        CandidateCv {
            id: row.id,
            job_id: row.job_id,
            applicant_id: row.applicant_id,
            applicant_name: row.applicant_name,
            email: row.email,
            skills: row.skills,
            experience: row.experience,
            education: row.education,
            work_history: row.work_history.0,
            submitted_at: row.submitted_at,
        }
    }
}

#[derive(FromRow)]
struct DecisionRow {
    id: Uuid,
    cv_id: Uuid,
    job_id: Uuid,
    decision: String,
    notes: Option<String>,
    decided_by: Uuid,
    decided_at: DateTime<Utc>,
}

impl TryFrom<DecisionRow> for HiringDecision {
    type Error = StoreError;

    fn try_from(row: DecisionRow) -> Result<Self, Self::Error> {
        let decision = row.decision.parse::<Decision>().map_err(|_| {
            StoreError::Database(sqlx::Error::Decode(
                format!("unknown decision '{}' for cv {}", row.decision, row.cv_id).into(),
            ))
        })?;
        Ok(HiringDecision {
            id: row.id,
            cv_id: row.cv_id,
            job_id: row.job_id,
            decision,
            notes: row.notes,
            decided_by: row.decided_by,
            decided_at: row.decided_at,
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait implementations
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                warn!("Signup rejected: email already registered");
                Err(StoreError::Duplicate(format!(
                    "An account with email {} already exists",
                    user.email
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn insert_job(&self, job: &Job) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO jobs
                (id, title, description, skills, experience, education, location,
                 created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.skills)
        .bind(&job.experience)
        .bind(&job.education)
        .bind(&job.location)
        .bind(job.created_by)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        Ok(sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(
            sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY created_at DESC, id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError> {
        // cvs, assessments and decisions go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CandidateStore for PgStore {
    async fn insert_cv(&self, cv: &CandidateCv) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO cvs
                (id, job_id, applicant_id, applicant_name, email, skills,
                 experience, education, work_history, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(cv.id)
        .bind(cv.job_id)
        .bind(cv.applicant_id)
        .bind(&cv.applicant_name)
        .bind(&cv.email)
        .bind(&cv.skills)
        .bind(&cv.experience)
        .bind(&cv.education)
        .bind(Json(&cv.work_history))
        .bind(cv.submitted_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Duplicate(format!(
                "Applicant already applied to job {}",
                cv.job_id
            ))),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_cv(&self, id: Uuid) -> Result<Option<CandidateCv>, StoreError> {
        Ok(sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(CandidateCv::from))
    }

    async fn list_cvs_for_job(&self, job_id: Uuid) -> Result<Vec<CandidateCv>, StoreError> {
        let rows = sqlx::query_as::<_, CvRow>(
            "SELECT * FROM cvs WHERE job_id = $1 ORDER BY submitted_at ASC, id",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CandidateCv::from).collect())
    }
}

#[async_trait]
impl AssessmentStore for PgStore {
    async fn insert_assessment(&self, result: &AssessmentResult) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO assessments (id, cv_id, trait_name, score, taken_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(result.id)
        .bind(result.cv_id)
        .bind(&result.trait_name)
        .bind(result.score)
        .bind(result.taken_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn latest_assessment(
        &self,
        cv_id: Uuid,
    ) -> Result<Option<AssessmentResult>, StoreError> {
        Ok(sqlx::query_as::<_, AssessmentResult>(
            "SELECT * FROM assessments WHERE cv_id = $1 ORDER BY taken_at DESC LIMIT 1",
        )
        .bind(cv_id)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[async_trait]
impl DecisionStore for PgStore {
    async fn upsert_decision(&self, decision: &HiringDecision) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO decisions (id, cv_id, job_id, decision, notes, decided_by, decided_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (cv_id) DO UPDATE SET
                id = EXCLUDED.id,
                decision = EXCLUDED.decision,
                notes = EXCLUDED.notes,
                decided_by = EXCLUDED.decided_by,
                decided_at = EXCLUDED.decided_at
            "#,
        )
        .bind(decision.id)
        .bind(decision.cv_id)
        .bind(decision.job_id)
        .bind(decision.decision.as_str())
        .bind(&decision.notes)
        .bind(decision.decided_by)
        .bind(decision.decided_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_decision(&self, cv_id: Uuid) -> Result<Option<HiringDecision>, StoreError> {
        sqlx::query_as::<_, DecisionRow>("SELECT * FROM decisions WHERE cv_id = $1")
            .bind(cv_id)
            .fetch_optional(&self.pool)
            .await?
            .map(HiringDecision::try_from)
            .transpose()
    }

    async fn list_decisions_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<HiringDecision>, StoreError> {
        sqlx::query_as::<_, DecisionRow>(
            "SELECT * FROM decisions WHERE job_id = $1 ORDER BY decided_at DESC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(HiringDecision::try_from)
        .collect()
    }
}
