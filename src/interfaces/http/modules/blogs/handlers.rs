//! Blog API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{BlogRequest, BlogResponse};
use crate::application::BlogService;
use crate::interfaces::http::common::{ApiPath, ApiResult, ErrorBody, MessageResponse, ValidatedJson};
use crate::interfaces::http::middleware::CurrentUser;

#[utoipa::path(
    post,
    path = "/blog/create",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    request_body = BlogRequest,
    responses(
        (status = 201, description = "Blog created", body = BlogResponse),
        (status = 400, description = "Author does not exist", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 422, description = "Validation error", body = ErrorBody)
    )
)]
pub async fn create_blog(
    _user: CurrentUser,
    State(blogs): State<Arc<BlogService>>,
    ValidatedJson(request): ValidatedJson<BlogRequest>,
) -> ApiResult<(StatusCode, Json<BlogResponse>)> {
    let blog = blogs.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(blog.into())))
}

#[utoipa::path(
    get,
    path = "/blog/all_blogs",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Blog list", body = Vec<BlogResponse>),
        (status = 401, description = "Unauthorized", body = ErrorBody)
    )
)]
pub async fn list_blogs(
    _user: CurrentUser,
    State(blogs): State<Arc<BlogService>>,
) -> ApiResult<Json<Vec<BlogResponse>>> {
    let all = blogs.list().await?;
    Ok(Json(all.into_iter().map(BlogResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/blog/{blog_id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("blog_id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog details", body = BlogResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_blog(
    _user: CurrentUser,
    State(blogs): State<Arc<BlogService>>,
    ApiPath(blog_id): ApiPath<i32>,
) -> ApiResult<Json<BlogResponse>> {
    Ok(Json(blogs.get(blog_id).await?.into()))
}

#[utoipa::path(
    put,
    path = "/blog/update/{blog_id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("blog_id" = i32, Path, description = "Blog ID")),
    request_body = BlogRequest,
    responses(
        (status = 200, description = "Blog updated", body = BlogResponse),
        (status = 400, description = "Author does not exist", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_blog(
    _user: CurrentUser,
    State(blogs): State<Arc<BlogService>>,
    ApiPath(blog_id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<BlogRequest>,
) -> ApiResult<Json<BlogResponse>> {
    Ok(Json(blogs.update(blog_id, request.into()).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/blog/delete/{blog_id}",
    tag = "Blogs",
    security(("bearer_auth" = [])),
    params(("blog_id" = i32, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_blog(
    _user: CurrentUser,
    State(blogs): State<Arc<BlogService>>,
    ApiPath(blog_id): ApiPath<i32>,
) -> ApiResult<Json<MessageResponse>> {
    blogs.delete(blog_id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Blog with ID {} deleted successfully",
        blog_id
    ))))
}
