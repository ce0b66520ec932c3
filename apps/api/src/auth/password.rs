use anyhow::Context;

use crate::errors::AppError;

/// Hashes on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("password hashing task failed")?
        .context("failed to hash password")?;
    Ok(hashed)
}

#[cfg(test)]
tokio::task_local! {
    /// Counts `verify_password` calls made inside a scoped test task.
    pub(crate) static VERIFY_CALLS: std::cell::Cell<usize>;
}

/// A malformed stored hash counts as a mismatch rather than a server error.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    #[cfg(test)]
    let _ = VERIFY_CALLS.try_with(|calls| calls.set(calls.get() + 1));

    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .context("password verification task failed")?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter22".to_string(), 4)
            .await
            .unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("x".to_string(), "not-a-hash".to_string())
            .await
            .unwrap());
    }
}
