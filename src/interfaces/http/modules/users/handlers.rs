//! User management API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::*;
use crate::application::UserService;
use crate::interfaces::http::common::{
    ApiPath, ApiQuery, ApiResult, ErrorBody, MessageResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::CurrentUser;

#[utoipa::path(
    post,
    path = "/users/create_user",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Username or email already exists", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(users): State<Arc<UserService>>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = users.create_user(request.into()).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/users/all_users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User list", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_users(
    _user: CurrentUser,
    State(users): State<Arc<UserService>>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let all = users.list_users().await?;
    Ok(Json(all.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_user(
    _user: CurrentUser,
    State(users): State<Arc<UserService>>,
    ApiPath(user_id): ApiPath<i32>,
) -> ApiResult<Json<UserResponse>> {
    let user = users.get_user(user_id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/users/update_user/{user_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Username or email already exists", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_user(
    _user: CurrentUser,
    State(users): State<Arc<UserService>>,
    ApiPath(user_id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = users.update_user(user_id, request.into()).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/users/delete_user/{user_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "User still has blogs or a password", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_user(
    _user: CurrentUser,
    State(users): State<Arc<UserService>>,
    ApiPath(user_id): ApiPath<i32>,
) -> ApiResult<Json<MessageResponse>> {
    users.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "User with ID {} deleted successfully",
        user_id
    ))))
}

// ── Password credentials ───────────────────────────────────────

#[utoipa::path(
    post,
    path = "/users/password/create",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreatePasswordRequest,
    responses(
        (status = 200, description = "Password stored", body = CredentialResponse),
        (status = 400, description = "User already has a password or does not exist", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_password(
    _user: CurrentUser,
    State(users): State<Arc<UserService>>,
    ValidatedJson(request): ValidatedJson<CreatePasswordRequest>,
) -> ApiResult<Json<CredentialResponse>> {
    let credential = users
        .create_password(request.user_id, &request.password)
        .await?;
    Ok(Json(credential.into()))
}

#[utoipa::path(
    get,
    path = "/users/password/check/{user_id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("user_id" = i32, Path, description = "User ID"), PasswordCheckParams),
    responses(
        (status = 200, description = "Check result", body = PasswordCheckResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn check_password(
    _user: CurrentUser,
    State(users): State<Arc<UserService>>,
    ApiPath(user_id): ApiPath<i32>,
    ApiQuery(params): ApiQuery<PasswordCheckParams>,
) -> ApiResult<Json<PasswordCheckResponse>> {
    let is_valid = users.check_password(user_id, &params.user_pass).await?;
    Ok(Json(PasswordCheckResponse { is_valid }))
}
