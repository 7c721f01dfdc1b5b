//! Application services

mod blog;

pub use blog::BlogService;
