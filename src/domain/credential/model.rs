use chrono::{DateTime, Utc};

/// Stored password hash bound to one user
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    pub id: i32,
    pub user_id: i32,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}
