//! Blocking-pool wrappers around the password manager.
//!
//! bcrypt is CPU-bound by design; running it inline would stall the
//! runtime worker for the whole hash.

use tokio::task;
use tracing::error;

use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::{PasswordError, PasswordManager};

pub(crate) async fn hash(passwords: PasswordManager, plaintext: String) -> DomainResult<String> {
    task::spawn_blocking(move || passwords.hash_password(&plaintext))
        .await
        .map_err(|e| DomainError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| match e {
            PasswordError::TooLong(_) => DomainError::Validation(e.to_string()),
            PasswordError::Bcrypt(e) => {
                DomainError::Internal(format!("Failed to hash password: {}", e))
            }
        })
}

/// A panicked or cancelled task counts as a mismatch.
pub(crate) async fn verify(passwords: PasswordManager, plaintext: String, digest: String) -> bool {
    match task::spawn_blocking(move || passwords.verify_password(&plaintext, &digest)).await {
        Ok(valid) => valid,
        Err(e) => {
            error!("Password verification task failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_on_blocking_pool() {
        let pm = PasswordManager::new(4);
        let digest = hash(pm, "pa55word".into()).await.unwrap();

        assert!(verify(pm, "pa55word".into(), digest.clone()).await);
        assert!(!verify(pm, "wrong".into(), digest).await);
    }

    #[tokio::test]
    async fn over_long_password_is_a_validation_error() {
        let err = hash(PasswordManager::new(4), "x".repeat(73)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn bad_cost_surfaces_as_internal() {
        let err = hash(PasswordManager::new(99), "x".into()).await.unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
