//! Path and query extractors whose rejections use the `{detail}` body.
//!
//! axum's own `Path`/`Query` reject with 400 and plain text; ids that do
//! not parse and missing query parameters are reported as 422 instead.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::ApiError;

pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
        Ok(ApiPath(value))
    }
}

pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::unprocessable(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Needle {
        q: String,
    }

    async fn by_id(ApiPath(id): ApiPath<i32>) -> String {
        id.to_string()
    }

    async fn search(ApiQuery(needle): ApiQuery<Needle>) -> String {
        needle.q
    }

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(by_id))
            .route("/search", get(search))
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn well_formed_parameters_pass() {
        assert_eq!(status_of("/items/12").await, StatusCode::OK);
        assert_eq!(status_of("/search?q=rust").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_parameters_are_unprocessable() {
        assert_eq!(status_of("/items/twelve").await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_of("/search").await, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
