//! Application layer: use-cases orchestrating repositories and crypto.
//!
//! HTTP handlers stay thin and delegate everything here.

pub mod identity;
pub mod services;

pub use identity::{AuthService, UserService};
pub use services::BlogService;
