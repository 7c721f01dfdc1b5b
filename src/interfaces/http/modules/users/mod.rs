//! Users module — accounts and password credentials

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
