//! Password hashing and bearer-token signing

pub mod jwt;
pub mod password;

pub use jwt::{AccessClaims, JwtConfig, TokenConfigError, TokenService};
pub use password::{PasswordError, PasswordManager, MAX_PASSWORD_BYTES};
