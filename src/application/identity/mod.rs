//! Identity module — authentication, accounts and password credentials
//!
//! `AuthService` owns the single authentication primitive used by both
//! login endpoints; `UserService` manages accounts and their credentials.

pub mod auth;
mod hashing;
pub mod service;

pub use auth::AuthService;
pub use service::UserService;
