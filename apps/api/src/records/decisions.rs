use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::decision::{DecisionRequest, HiringDecision};
use crate::records::jobs::load_job;
use crate::state::AppState;

/// PUT /api/cvs/:id/decision
///
/// Replaces any earlier decision on the CV.
pub async fn handle_record_decision(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<Uuid>,
    ApiJson(request): ApiJson<DecisionRequest>,
) -> Result<Json<HiringDecision>, AppError> {
    user.require_hiring_staff()?;

    let cv = state
        .cvs
        .find_cv(cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {cv_id} not found")))?;

    let decision = HiringDecision::new(request, cv.id, cv.job_id, user.id());
    state.decisions.upsert_decision(&decision).await?;
    info!(
        "Decision '{}' recorded for CV {} by {}",
        decision.decision.as_str(),
        cv.id,
        user.id()
    );

    Ok(Json(decision))
}

/// GET /api/jobs/:id/decisions
pub async fn handle_list_decisions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<HiringDecision>>, AppError> {
    user.require_hiring_staff()?;
    let job = load_job(&state, job_id).await?;
    Ok(Json(state.decisions.list_decisions_for_job(job.id).await?))
}
