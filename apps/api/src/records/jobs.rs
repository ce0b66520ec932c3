use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::job::{Job, JobRequest};
use crate::state::AppState;

pub(crate) async fn load_job(state: &AppState, job_id: Uuid) -> Result<Job, AppError> {
    state
        .jobs
        .find_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(state.jobs.list_jobs().await?))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<JobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    user.require_hiring_staff()?;

    let job = Job::create(request, user.id())?;
    state.jobs.insert_job(&job).await?;
    info!("Job {} '{}' posted by {}", job.id, job.title, user.id());

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(load_job(&state, job_id).await?))
}

/// DELETE /api/jobs/:id
///
/// Only the poster may delete. CVs, assessments and decisions go with it.
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let job = load_job(&state, job_id).await?;
    if job.created_by != user.id() {
        return Err(AppError::Forbidden);
    }

    if !state.jobs.delete_job(job.id).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("Job {job_id} deleted by {}", user.id());

    Ok(StatusCode::NO_CONTENT)
}
