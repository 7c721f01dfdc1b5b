use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{Credential, CredentialRepository, DomainError, DomainResult};
use crate::infrastructure::database::entities::user_password;
use crate::infrastructure::database::map_db_err;

const DUPLICATE_CREDENTIAL: &str =
    "Duplicate entry: user password exists or user does not exist";

pub struct SeaOrmCredentialRepository {
    db: DatabaseConnection,
}

impl SeaOrmCredentialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn credential_model_to_domain(model: user_password::Model) -> Credential {
    Credential {
        id: model.id,
        user_id: model.user_id,
        password_hash: model.password_hash,
        created_at: model.created_at,
        active: model.active,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    map_db_err(e, DUPLICATE_CREDENTIAL)
}

#[async_trait]
impl CredentialRepository for SeaOrmCredentialRepository {
    async fn create(&self, user_id: i32, password_hash: String) -> DomainResult<Credential> {
        let credential = user_password::ActiveModel {
            user_id: Set(user_id),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            active: Set(true),
            ..Default::default()
        };

        let model = credential.insert(&self.db).await.map_err(db_err)?;
        Ok(credential_model_to_domain(model))
    }

    async fn find_active_for_user(&self, user_id: i32) -> DomainResult<Option<Credential>> {
        let model = user_password::Entity::find()
            .filter(user_password::Column::UserId.eq(user_id))
            .filter(user_password::Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(credential_model_to_domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateUserDto, UserRepository};
    use crate::infrastructure::database::repositories::user_repository::SeaOrmUserRepository;
    use crate::infrastructure::database::test_database;

    async fn seeded() -> (SeaOrmCredentialRepository, i32) {
        let db = test_database().await;
        let user = SeaOrmUserRepository::new(db.clone())
            .create(CreateUserDto {
                username: "ann".into(),
                email: "ann@example.com".into(),
                full_name: None,
                is_active: true,
                is_superuser: false,
            })
            .await
            .unwrap();
        (SeaOrmCredentialRepository::new(db), user.id)
    }

    #[tokio::test]
    async fn stored_credential_is_active() {
        let (repo, user_id) = seeded().await;
        let created = repo.create(user_id, "$2b$04$digest".into()).await.unwrap();
        assert!(created.active);

        let found = repo.find_active_for_user(user_id).await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.find_active_for_user(user_id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_credential_for_same_user_is_rejected() {
        let (repo, user_id) = seeded().await;
        repo.create(user_id, "$2b$04$first".into()).await.unwrap();

        let err = repo.create(user_id, "$2b$04$second".into()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn concurrent_inserts_leave_one_active_credential() {
        let (repo, user_id) = seeded().await;
        let repo = std::sync::Arc::new(repo);

        let a = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(user_id, "$2b$04$a".into()).await })
        };
        let b = {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(user_id, "$2b$04$b".into()).await })
        };
        let results = [a.await.unwrap(), b.await.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    }

    #[tokio::test]
    async fn credential_for_unknown_user_is_rejected() {
        let (repo, user_id) = seeded().await;
        let err = repo.create(user_id + 1, "$2b$04$x".into()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
