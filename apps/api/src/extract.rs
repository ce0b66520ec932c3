use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections come back as `AppError::Validation`, so a
/// malformed body gets the same 400 envelope as every other bad input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
