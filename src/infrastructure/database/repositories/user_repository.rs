use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepository};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::map_db_err;

const DUPLICATE_USER: &str = "Duplicate entry: username or email exists";
const USER_IN_USE: &str = "Cannot delete user with associated data";

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        full_name: model.full_name,
        is_active: model.is_active,
        is_superuser: model.is_superuser,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    map_db_err(e, DUPLICATE_USER)
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            full_name: Set(dto.full_name),
            is_active: Set(dto.is_active),
            is_superuser: Set(dto.is_superuser),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await.map_err(db_err)?;
        Ok(user_model_to_domain(model))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn update(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        if dto.is_empty() {
            return Ok(Some(user_model_to_domain(existing)));
        }

        let mut active: user::ActiveModel = existing.into();

        if let Some(username) = dto.username {
            active.username = Set(username);
        }
        if let Some(email) = dto.email {
            active.email = Set(email);
        }
        if let Some(full_name) = dto.full_name {
            active.full_name = Set(full_name);
        }
        if let Some(is_active) = dto.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(is_superuser) = dto.is_superuser {
            active.is_superuser = Set(is_superuser);
        }

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(user_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| map_db_err(e, USER_IN_USE))?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", "id", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;

    fn dto(username: &str, email: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            email: email.to_string(),
            full_name: None,
            is_active: true,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn create_and_find_by_email() {
        let repo = SeaOrmUserRepository::new(test_database().await);

        let created = repo.create(dto("ann", "ann@example.com")).await.unwrap();
        assert!(created.id > 0);

        let found = repo.find_by_email("ann@example.com").await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        repo.create(dto("ann", "ann@example.com")).await.unwrap();

        let err = repo.create(dto("ann2", "ann@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let created = repo.create(dto("ann", "ann@example.com")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateUserDto {
                    full_name: Some(Some("Ann Example".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.full_name.as_deref(), Some("Ann Example"));
        assert_eq!(updated.username, "ann");
        assert!(repo.update(999, UpdateUserDto::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn explicit_none_clears_full_name() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let mut new_user = dto("ann", "ann@example.com");
        new_user.full_name = Some("Ann Example".into());
        let created = repo.create(new_user).await.unwrap();

        let cleared = repo
            .update(
                created.id,
                UpdateUserDto {
                    full_name: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cleared.full_name, None);
        assert_eq!(cleared.email, "ann@example.com");
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() {
        let repo = SeaOrmUserRepository::new(test_database().await);
        let err = repo.delete(42).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }
}
