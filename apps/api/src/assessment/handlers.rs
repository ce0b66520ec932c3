use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::assessment::AssessmentResult;
use crate::models::cv::CandidateCv;
use crate::state::AppState;

/// Either raw answers for the scoring API, or a score entered by hiring staff.
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    pub trait_name: Option<String>,
    pub score: Option<f64>,
    pub answers: Option<Vec<Value>>,
}

/// Loads a CV the caller may see: its applicant, or hiring staff.
pub(crate) async fn load_visible_cv(
    state: &AppState,
    user: &AuthUser,
    cv_id: Uuid,
) -> Result<CandidateCv, AppError> {
    let cv = state
        .cvs
        .find_cv(cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {cv_id} not found")))?;

    if cv.applicant_id != user.id() && !user.role().is_hiring_staff() {
        return Err(AppError::Forbidden);
    }
    Ok(cv)
}

/// POST /api/cvs/:id/assessment
pub async fn handle_record_assessment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<Uuid>,
    ApiJson(request): ApiJson<AssessmentRequest>,
) -> Result<(StatusCode, Json<AssessmentResult>), AppError> {
    let cv = load_visible_cv(&state, &user, cv_id).await?;

    let result = match (request.answers, request.trait_name, request.score) {
        (Some(answers), _, _) => {
            let client = state.personality.as_ref().ok_or_else(|| {
                AppError::Validation(
                    "answers cannot be scored: no personality scoring API is configured".to_string(),
                )
            })?;
            if answers.is_empty() {
                return Err(AppError::Validation("answers cannot be empty".to_string()));
            }
            let scored = client.score(&answers).await?;
            AssessmentResult::record(cv.id, &scored.trait_name, scored.score)?
        }
        (None, Some(trait_name), Some(score)) => {
            // Applicants go through the scoring API; only staff enter scores directly.
            user.require_hiring_staff()?;
            AssessmentResult::record(cv.id, &trait_name, score)?
        }
        _ => {
            return Err(AppError::Validation(
                "provide either answers or trait_name and score".to_string(),
            ))
        }
    };

    state.assessments.insert_assessment(&result).await?;
    info!(
        "Recorded {} assessment for CV {} (score {:.1})",
        result.trait_name, cv.id, result.score
    );

    Ok((StatusCode::CREATED, Json(result)))
}

/// GET /api/cvs/:id/assessment
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<Uuid>,
) -> Result<Json<AssessmentResult>, AppError> {
    let cv = load_visible_cv(&state, &user, cv_id).await?;
    let result = state
        .assessments
        .latest_assessment(cv.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No assessment recorded for CV {cv_id}")))?;
    Ok(Json(result))
}
