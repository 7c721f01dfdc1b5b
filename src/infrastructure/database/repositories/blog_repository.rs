use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{Blog, BlogRepository, DomainError, DomainResult, NewBlogDto};
use crate::infrastructure::database::entities::blog;
use crate::infrastructure::database::map_db_err;

const UNKNOWN_AUTHOR: &str = "Author does not exist";

pub struct SeaOrmBlogRepository {
    db: DatabaseConnection,
}

impl SeaOrmBlogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn blog_model_to_domain(model: blog::Model) -> Blog {
    Blog {
        id: model.id,
        title: model.title,
        content: model.content,
        author_id: model.author_id,
        created_at: model.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    map_db_err(e, UNKNOWN_AUTHOR)
}

#[async_trait]
impl BlogRepository for SeaOrmBlogRepository {
    async fn create(&self, dto: NewBlogDto) -> DomainResult<Blog> {
        let new_blog = blog::ActiveModel {
            title: Set(dto.title),
            content: Set(dto.content),
            author_id: Set(dto.author_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = new_blog.insert(&self.db).await.map_err(db_err)?;
        Ok(blog_model_to_domain(model))
    }

    async fn find_all(&self) -> DomainResult<Vec<Blog>> {
        let models = blog::Entity::find()
            .order_by_asc(blog::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(blog_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Blog>> {
        let model = blog::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(blog_model_to_domain))
    }

    async fn update(&self, id: i32, dto: NewBlogDto) -> DomainResult<Option<Blog>> {
        let existing = blog::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: blog::ActiveModel = existing.into();
        active.title = Set(dto.title);
        active.content = Set(dto.content);
        active.author_id = Set(dto.author_id);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(blog_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = blog::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Blog", "id", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUserDto, UserRepository};
    use crate::infrastructure::database::repositories::user_repository::SeaOrmUserRepository;
    use crate::infrastructure::database::test_database;

    async fn seeded() -> (SeaOrmBlogRepository, SeaOrmUserRepository, i32) {
        let db = test_database().await;
        let users = SeaOrmUserRepository::new(db.clone());
        let author = users
            .create(CreateUserDto {
                username: "writer".into(),
                email: "writer@example.com".into(),
                full_name: None,
                is_active: true,
                is_superuser: false,
            })
            .await
            .unwrap();
        (SeaOrmBlogRepository::new(db), users, author.id)
    }

    fn post(author_id: i32) -> NewBlogDto {
        NewBlogDto {
            title: "Hello".into(),
            content: "First post".into(),
            author_id,
        }
    }

    #[tokio::test]
    async fn create_update_delete_roundtrip() {
        let (blogs, _, author_id) = seeded().await;

        let created = blogs.create(post(author_id)).await.unwrap();
        assert_eq!(created.author_id, author_id);

        let updated = blogs
            .update(
                created.id,
                NewBlogDto {
                    title: "Hello again".into(),
                    ..post(author_id)
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Hello again");
        assert_eq!(updated.created_at, created.created_at);

        blogs.delete(created.id).await.unwrap();
        assert!(blogs.find_by_id(created.id).await.unwrap().is_none());
        assert!(matches!(
            blogs.delete(created.id).await.unwrap_err(),
            DomainError::NotFound { entity: "Blog", .. }
        ));
    }

    #[tokio::test]
    async fn unknown_author_is_a_conflict() {
        let (blogs, _, author_id) = seeded().await;
        let err = blogs.create(post(author_id + 100)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn author_with_posts_cannot_be_deleted() {
        let (blogs, users, author_id) = seeded().await;
        blogs.create(post(author_id)).await.unwrap();

        let err = users.delete(author_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
