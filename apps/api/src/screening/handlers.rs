//! Axum route handlers for the Screening API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::assessment::validate_score;
use crate::models::decision::Decision;
use crate::records::jobs::load_job;
use crate::screening::report::{generate_report, CandidateReport};
use crate::screening::scoring::{evaluate, FilterResult, HiringCategory, ScreeningInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ScreeningEntry {
    pub cv_id: Uuid,
    pub applicant_name: String,
    pub filter: FilterResult,
    pub decision: Option<Decision>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PendingCandidate {
    pub cv_id: Uuid,
    pub applicant_name: String,
    pub status: String,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub high_potential: usize,
    pub good_fit: usize,
    pub needs_development: usize,
    pub not_suitable: usize,
}

impl CategoryCounts {
    fn add(&mut self, category: HiringCategory) {
        match category {
            HiringCategory::HighPotential => self.high_potential += 1,
            HiringCategory::GoodFit => self.good_fit += 1,
            HiringCategory::NeedsDevelopment => self.needs_development += 1,
            HiringCategory::NotSuitable => self.not_suitable += 1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScreeningResponse {
    pub job_id: Uuid,
    pub candidates: Vec<ScreeningEntry>,
    pub pending: Vec<PendingCandidate>,
    pub category_counts: CategoryCounts,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: CandidateReport,
    pub filter: FilterResult,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub overall_score: f64,
    pub job_fit: f64,
    #[serde(default)]
    pub cv_skills: Vec<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
    pub cv_experience: Option<String>,
    pub job_experience: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/jobs/:id/screening
///
/// Scores every assessed CV for the job, best first. CVs without an
/// assessment are listed as pending.
pub async fn handle_screen_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ScreeningResponse>, AppError> {
    user.require_hiring_staff()?;
    let job = load_job(&state, job_id).await?;
    let cvs = state.cvs.list_cvs_for_job(job.id).await?;

    let mut candidates = Vec::new();
    let mut pending = Vec::new();
    let mut category_counts = CategoryCounts::default();

    for cv in cvs {
        let Some(assessment) = state.assessments.latest_assessment(cv.id).await? else {
            pending.push(PendingCandidate {
                cv_id: cv.id,
                applicant_name: cv.applicant_name,
                status: "pending_assessment".to_string(),
            });
            continue;
        };

        let report = generate_report(&cv, &job, &assessment);
        let filter = evaluate(&report.screening_input(&cv, &job));
        category_counts.add(filter.category);

        let decision = state.decisions.find_decision(cv.id).await?.map(|d| d.decision);
        candidates.push(ScreeningEntry {
            cv_id: cv.id,
            applicant_name: cv.applicant_name,
            filter,
            decision,
        });
    }

    sort_entries(&mut candidates);

    Ok(Json(ScreeningResponse {
        job_id: job.id,
        candidates,
        pending,
        category_counts,
    }))
}

/// GET /api/cvs/:id/report
pub async fn handle_get_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(cv_id): Path<Uuid>,
) -> Result<Json<ReportResponse>, AppError> {
    user.require_hiring_staff()?;

    let cv = state
        .cvs
        .find_cv(cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {cv_id} not found")))?;
    let job = load_job(&state, cv.job_id).await?;
    let assessment = state
        .assessments
        .latest_assessment(cv.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No assessment recorded for CV {cv_id}")))?;

    let report = generate_report(&cv, &job, &assessment);
    let filter = evaluate(&report.screening_input(&cv, &job));

    Ok(Json(ReportResponse { report, filter }))
}

/// POST /api/screening/evaluate
///
/// Stateless evaluation of explicit inputs.
pub async fn handle_evaluate(
    _user: AuthUser,
    ApiJson(request): ApiJson<EvaluateRequest>,
) -> Result<Json<FilterResult>, AppError> {
    let overall_score = validate_score("overall_score", request.overall_score)?;
    let job_fit = validate_score("job_fit", request.job_fit)?;

    let input = ScreeningInput {
        overall_score,
        job_fit,
        cv_skills: &request.cv_skills,
        job_skills: &request.job_skills,
        cv_experience: request.cv_experience.as_deref(),
        job_experience: request.job_experience.as_deref(),
    };

    Ok(Json(evaluate(&input)))
}

/// Highest score first; ties broken by name, then id, so the order is stable.
fn sort_entries(entries: &mut [ScreeningEntry]) {
    entries.sort_by(|a, b| {
        b.filter
            .filter_score
            .cmp(&a.filter.filter_score)
            .then_with(|| a.applicant_name.cmp(&b.applicant_name))
            .then_with(|| a.cv_id.cmp(&b.cv_id))
    });
}
