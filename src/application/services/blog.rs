use std::sync::Arc;

use tracing::info;

use crate::domain::{Blog, DomainError, DomainResult, NewBlogDto, RepositoryProvider};

/// Blog post CRUD.
pub struct BlogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BlogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, dto: NewBlogDto) -> DomainResult<Blog> {
        let blog = self.repos.blogs().create(dto).await?;
        info!(blog_id = blog.id, author_id = blog.author_id, "Blog created");
        Ok(blog)
    }

    pub async fn list(&self) -> DomainResult<Vec<Blog>> {
        self.repos.blogs().find_all().await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Blog> {
        self.repos
            .blogs()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blog", "id", id))
    }

    pub async fn update(&self, id: i32, dto: NewBlogDto) -> DomainResult<Blog> {
        self.repos
            .blogs()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Blog", "id", id))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        self.repos.blogs().delete(id).await?;
        info!(blog_id = id, "Blog deleted");
        Ok(())
    }
}
