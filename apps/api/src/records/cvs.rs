use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::assessment::handlers::load_visible_cv;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::cv::{CandidateCv, CvRequest};
use crate::models::user::Role;
use crate::records::jobs::load_job;
use crate::state::AppState;

/// POST /api/jobs/:id/cvs
///
/// Submitting a CV against a job is the application. Job seekers only, once per job.
pub async fn handle_submit_cv(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    ApiJson(request): ApiJson<CvRequest>,
) -> Result<(StatusCode, Json<CandidateCv>), AppError> {
    if user.role() != Role::JobSeeker {
        return Err(AppError::Forbidden);
    }
    let job = load_job(&state, job_id).await?;

    let cv = CandidateCv::submit(request, job.id, user.id())?;
    state.cvs.insert_cv(&cv).await?;
    info!("CV {} submitted for job {} by {}", cv.id, job.id, user.id());

    Ok((StatusCode::CREATED, Json(cv)))
}

/// GET /api/jobs/:id/cvs
pub async fn handle_list_cvs(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<CandidateCv>>, AppError> {
    user.require_hiring_staff()?;
    let job = load_job(&state, job_id).await?;
    Ok(Json(state.cvs.list_cvs_for_job(job.id).await?))
}

/// GET /api/cvs/:id
pub async fn handle_get_cv(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<Uuid>,
) -> Result<Json<CandidateCv>, AppError> {
    Ok(Json(load_visible_cv(&state, &user, cv_id).await?))
}
