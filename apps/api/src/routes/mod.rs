pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::auth::handlers as auth;
use crate::records::{cvs, decisions, jobs};
use crate::screening::handlers as screening;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Auth API
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/signup", post(auth::handle_signup))
        .route("/api/auth/verify", post(auth::handle_verify))
        // Jobs & applications
        .route(
            "/api/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::handle_get_job).delete(jobs::handle_delete_job),
        )
        .route(
            "/api/jobs/:id/cvs",
            get(cvs::handle_list_cvs).post(cvs::handle_submit_cv),
        )
        .route("/api/cvs/:id", get(cvs::handle_get_cv))
        // Assessments
        .route(
            "/api/cvs/:id/assessment",
            get(assessment::handle_get_assessment).post(assessment::handle_record_assessment),
        )
        // Screening & decisions
        .route("/api/jobs/:id/screening", get(screening::handle_screen_job))
        .route("/api/cvs/:id/report", get(screening::handle_get_report))
        .route("/api/screening/evaluate", post(screening::handle_evaluate))
        .route("/api/cvs/:id/decision", put(decisions::handle_record_decision))
        .route(
            "/api/jobs/:id/decisions",
            get(decisions::handle_list_decisions),
        )
        .with_state(state)
}
