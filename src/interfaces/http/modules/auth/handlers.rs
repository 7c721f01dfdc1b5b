//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{LoginRequest, LoginResponse, TokenRequest, TokenResponse};
use crate::application::AuthService;
use crate::interfaces::http::common::{ApiResult, ErrorBody, ValidatedForm, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;
use crate::interfaces::http::modules::users::UserResponse;

#[utoipa::path(
    post,
    path = "/authentication/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 422, description = "Malformed body", body = ErrorBody)
    )
)]
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = auth.authenticate(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
        username: user.username,
    }))
}

#[utoipa::path(
    post,
    path = "/authentication/generate_token",
    tag = "Authentication",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 422, description = "Malformed form", body = ErrorBody)
    )
)]
pub async fn generate_token(
    State(auth): State<Arc<AuthService>>,
    ValidatedForm(request): ValidatedForm<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = auth.authenticate(&request.username, &request.password).await?;
    let token = auth.issue_token(&user)?;

    Ok(Json(TokenResponse::bearer(token)))
}

#[utoipa::path(
    get,
    path = "/authentication/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Could not validate credentials", body = ErrorBody),
        (status = 404, description = "User no longer exists", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    CurrentUser(principal): CurrentUser,
    State(auth): State<Arc<AuthService>>,
) -> ApiResult<Json<UserResponse>> {
    let user = auth.current_user(&principal).await?;
    Ok(Json(user.into()))
}
