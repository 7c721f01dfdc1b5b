//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use crypto::{
    JwtConfig, PasswordError, PasswordManager, TokenConfigError, TokenService, MAX_PASSWORD_BYTES,
};
pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
