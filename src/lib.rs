//! # Blog Service
//!
//! CRUD blog backend: users, password credentials and blog posts behind
//! bearer-token authentication.
//!
//! ## Architecture
//!
//! - **domain**: entities, DTOs and repository traits
//! - **application**: use cases (authentication, user and blog services)
//! - **infrastructure**: SeaORM persistence, password hashing, token signing
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle (startup, metrics, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;

pub use server::{init_tracing, ServerHandle, ServerOptions};
