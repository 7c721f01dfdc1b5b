//! Password credentials
//!
//! At most one credential exists per user; the storage layer enforces it
//! with a unique index on `user_id`.

pub mod model;
pub mod repository;

pub use model::Credential;
pub use repository::CredentialRepository;
