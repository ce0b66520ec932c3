//! Axum route handlers for the authentication API.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::extractor::resolve_user;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::{PublicUser, Role, User};
use crate::models::{normalize_email, required};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub message: String,
    pub user: PublicUser,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (email, password) = match (request.email, request.password) {
        (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(AppError::Validation(
                "email and password are required".to_string(),
            ))
        }
    };
    let email = email.trim().to_lowercase();

    // Unknown emails still pay for one bcrypt check.
    let found = state.users.find_user_by_email(&email).await?;
    let hash = match &found {
        Some(user) => user.password_hash.clone(),
        None => state.login_decoy_hash.to_string(),
    };
    let verified = verify_password(password, hash).await?;

    let user = match found {
        Some(user) if verified => user,
        _ => {
            warn!("Login failed");
            return Err(AppError::Unauthorized);
        }
    };

    let token = issue_token(&user, &state.config.jwt_secret, token_ttl(&state))?;
    info!("User {} logged in", user.id);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: PublicUser::from(&user),
    }))
}

/// POST /api/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let name = required("name", request.name.as_deref().unwrap_or_default())?;
    let email = normalize_email(request.email.as_deref().unwrap_or_default())?;
    let password = request.password.unwrap_or_default();
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let role: Role = required("role", request.role.as_deref().unwrap_or_default())?.parse()?;

    // Store insert rejects duplicates too.
    if state.users.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "An account with email {email} already exists"
        )));
    }

    let password_hash = hash_password(password, state.config.bcrypt_cost).await?;
    let user = User {
        id: Uuid::new_v4(),
        name,
        email,
        password_hash,
        role,
        created_at: Utc::now(),
    };
    state.users.insert_user(&user).await?;
    info!("Created {} account {}", user.role, user.id);

    let token = issue_token(&user, &state.config.jwt_secret, token_ttl(&state))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: PublicUser::from(&user),
        }),
    ))
}

/// POST /api/auth/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VerifyRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let token = request
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("token is required".to_string()))?;

    let user = resolve_user(&state, token.trim()).await?;

    Ok(Json(VerifyResponse {
        message: "Token is valid".to_string(),
        user,
    }))
}

fn token_ttl(state: &AppState) -> Duration {
    Duration::days(state.config.token_ttl_days)
}
