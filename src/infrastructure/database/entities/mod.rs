//! Database entities module

pub mod blog;
pub mod user;
pub mod user_password;

pub use blog::Entity as Blog;
pub use user::Entity as User;
pub use user_password::Entity as UserPassword;
