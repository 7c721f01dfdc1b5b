//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{BlogRepository, CredentialRepository, RepositoryProvider, UserRepository};

use super::blog_repository::SeaOrmBlogRepository;
use super::credential_repository::SeaOrmCredentialRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    blogs: SeaOrmBlogRepository,
    credentials: SeaOrmCredentialRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            blogs: SeaOrmBlogRepository::new(db.clone()),
            credentials: SeaOrmCredentialRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn blogs(&self) -> &dyn BlogRepository {
        &self.blogs
    }

    fn credentials(&self) -> &dyn CredentialRepository {
        &self.credentials
    }
}
