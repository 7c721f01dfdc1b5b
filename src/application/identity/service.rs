//! User management service — application-layer orchestration
//!
//! All account and credential logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use super::hashing;
use crate::domain::{
    CreateUserDto, Credential, DomainError, DomainResult, RepositoryProvider, UpdateUserDto, User,
};
use crate::infrastructure::PasswordManager;

/// User service — orchestrates account and password use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    passwords: PasswordManager,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, passwords: PasswordManager) -> Self {
        Self { repos, passwords }
    }

    // ── Accounts ────────────────────────────────────────────────

    pub async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let user = self.repos.users().create(dto).await?;
        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    /// Apply only the fields present in `dto`.
    pub async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<User> {
        let user = self
            .repos
            .users()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        info!(user_id = id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i32) -> DomainResult<()> {
        self.repos.users().delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    // ── Credentials ─────────────────────────────────────────────

    /// Hash `plaintext` and store it as the user's only active credential.
    pub async fn create_password(&self, user_id: i32, plaintext: &str) -> DomainResult<Credential> {
        let digest = hashing::hash(self.passwords, plaintext.to_string()).await?;
        let credential = self.repos.credentials().create(user_id, digest).await?;
        info!(user_id, "Password credential stored");
        Ok(credential)
    }

    /// `false` when the user has no active credential.
    pub async fn check_password(&self, user_id: i32, plaintext: &str) -> DomainResult<bool> {
        let Some(credential) = self.repos.credentials().find_active_for_user(user_id).await? else {
            return Ok(false);
        };

        Ok(hashing::verify(self.passwords, plaintext.to_string(), credential.password_hash).await)
    }
}
