//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{CreateUserDto, Credential, UpdateUserDto, User};
use crate::interfaces::http::common::password_within_bcrypt_limit;

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            is_active: u.is_active,
            is_superuser: u.is_superuser,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub email: String,
    #[validate(length(max = 100))]
    pub full_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            full_name: r.full_name,
            is_active: r.is_active,
            is_superuser: r.is_superuser,
        }
    }
}

/// Absent → `None`, explicit `null` → `Some(None)`.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Partial update; absent fields are left unchanged, `"full_name": null`
/// clears the full name
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 100))]
    pub full_name: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            email: r.email,
            full_name: r.full_name,
            is_active: r.is_active,
            is_superuser: r.is_superuser,
        }
    }
}

/// Store a password for a user. `password_hash` is accepted as an alias
/// and, despite the name, carries the plaintext.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePasswordRequest {
    pub user_id: i32,
    #[serde(alias = "password_hash")]
    #[validate(
        length(min = 1, message = "password must not be empty"),
        custom(function = "password_within_bcrypt_limit")
    )]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CredentialResponse {
    pub id: i32,
    pub user_id: i32,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl From<Credential> for CredentialResponse {
    fn from(c: Credential) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            password_hash: c.password_hash,
            created_at: c.created_at,
            active: c.active,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PasswordCheckParams {
    /// Plaintext password to check
    pub user_pass: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PasswordCheckResponse {
    pub is_valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: serde_json::Value) -> UpdateUserRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn full_name_absent_null_and_set_are_distinct() {
        assert_eq!(parse(json!({})).full_name, None);
        assert_eq!(parse(json!({"full_name": null})).full_name, Some(None));
        assert_eq!(
            parse(json!({"full_name": "Ann"})).full_name,
            Some(Some("Ann".to_string()))
        );
    }

    #[test]
    fn full_name_length_still_validated() {
        let request = parse(json!({"full_name": "x".repeat(101)}));
        assert!(request.validate().is_err());
        assert!(parse(json!({"full_name": null})).validate().is_ok());
    }

    #[test]
    fn password_limit_is_in_bytes() {
        let request: CreatePasswordRequest =
            serde_json::from_value(json!({"user_id": 1, "password": "é".repeat(72)})).unwrap();
        assert!(request.validate().is_err());

        let request: CreatePasswordRequest =
            serde_json::from_value(json!({"user_id": 1, "password_hash": "é".repeat(36)}))
                .unwrap();
        assert!(request.validate().is_ok());
    }
}
