use async_trait::async_trait;

use super::{Blog, NewBlogDto};
use crate::domain::DomainResult;

#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Fails with `Conflict` when `author_id` references no user.
    async fn create(&self, dto: NewBlogDto) -> DomainResult<Blog>;

    async fn find_all(&self) -> DomainResult<Vec<Blog>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Blog>>;

    /// Replaces title, content and author. `None` when the blog does not exist.
    async fn update(&self, id: i32, dto: NewBlogDto) -> DomainResult<Option<Blog>>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
