//! Blog DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Blog, NewBlogDto};

/// Body for both create and full update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BlogRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub content: String,
    pub author_id: i32,
}

impl From<BlogRequest> for NewBlogDto {
    fn from(r: BlogRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
            author_id: r.author_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BlogResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Blog> for BlogResponse {
    fn from(b: Blog) -> Self {
        Self {
            id: b.id,
            title: b.title,
            content: b.content,
            author_id: b.author_id,
            created_at: b.created_at,
        }
    }
}
