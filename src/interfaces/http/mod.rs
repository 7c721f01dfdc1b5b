//! HTTP REST API interfaces
//!
//! - `common`: error mapping and validating extractors
//! - `middleware`: bearer-token authentication extractor
//! - `modules`: request handlers grouped by resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppState};
