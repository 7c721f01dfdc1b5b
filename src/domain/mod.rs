//! Domain layer: entities, DTOs and repository traits.
//!
//! Nothing here knows about HTTP or SeaORM.

pub mod blog;
pub mod credential;
pub mod principal;
pub mod repositories;
pub mod user;

pub use blog::{Blog, BlogRepository, NewBlogDto};
pub use credential::{Credential, CredentialRepository};
pub use principal::Principal;
pub use repositories::RepositoryProvider;
pub use user::{CreateUserDto, UpdateUserDto, User, UserRepository};

pub use crate::shared::errors::{DomainError, DomainResult};
