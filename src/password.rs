use crate::error::{AppError, AppResult};
use bcrypt::{hash, verify};

/// bcrypt is CPU bound, so it runs on the blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub async fn verify_password(password: String, hashed: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hashed = hash_password("123456", 4).await.unwrap();
        assert_ne!(hashed, "123456");
        assert!(verify_password("123456".into(), hashed.clone()).await.unwrap());
        assert!(!verify_password("654321".into(), hashed).await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_internal_error() {
        let err = verify_password("123456".into(), "not-a-hash".into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
