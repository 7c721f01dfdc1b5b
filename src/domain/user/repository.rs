use async_trait::async_trait;

use super::{CreateUserDto, UpdateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the username or email is taken.
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn find_all(&self) -> DomainResult<Vec<User>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Returns `None` when no user has this id.
    async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>>;

    /// Fails with `NotFound` for an unknown id and `Conflict` while blogs
    /// or credentials still reference the user.
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
