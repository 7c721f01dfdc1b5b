use async_trait::async_trait;

use super::Credential;
use crate::domain::DomainResult;

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Stores an already-hashed password as the user's active credential.
    ///
    /// Fails with `Conflict` if the user already has a credential or does not exist.
    async fn create(&self, user_id: i32, password_hash: String) -> DomainResult<Credential>;

    async fn find_active_for_user(&self, user_id: i32) -> DomainResult<Option<Credential>>;
}
