use chrono::{DateTime, Utc};

/// Blog post
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by clients on create and on full update.
#[derive(Debug, Clone)]
pub struct NewBlogDto {
    pub title: String,
    pub content: String,
    pub author_id: i32,
}
