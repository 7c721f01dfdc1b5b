//! Blog aggregate

pub mod model;
pub mod repository;

pub use model::{Blog, NewBlogDto};
pub use repository::BlogRepository;
