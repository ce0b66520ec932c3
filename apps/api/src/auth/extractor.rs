use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::token::decode_token;
use crate::errors::AppError;
use crate::models::user::{PublicUser, Role};
use crate::state::AppState;

/// The caller behind a valid `Authorization: Bearer <jwt>` header.
///
/// The account is re-read on every request, so deleting a user revokes
/// their outstanding tokens.
#[derive(Debug, Clone)]
pub struct AuthUser(pub PublicUser);

impl AuthUser {
    pub fn id(&self) -> uuid::Uuid {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn require_hiring_staff(&self) -> Result<(), AppError> {
        if self.0.role.is_hiring_staff() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        let user = resolve_user(state, token.trim()).await?;
        Ok(AuthUser(user))
    }
}

/// Decodes `token` and confirms the account still exists.
pub async fn resolve_user(state: &AppState, token: &str) -> Result<PublicUser, AppError> {
    let claims = decode_token(token, &state.config.jwt_secret)?;
    let user = state
        .users
        .find_user(claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(PublicUser::from(&user))
}
