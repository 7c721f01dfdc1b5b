//! Welcome page and health check

pub mod handlers;

pub use handlers::*;
