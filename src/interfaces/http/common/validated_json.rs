//! Validated body extractors for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>` and `ValidatedForm<T>`
//! like `axum::Form<T>`, but both additionally run
//! `validator::Validate::validate()` on the deserialized value.
//! Parse and validation failures alike become a 422 `{detail}` response.

use axum::extract::{FromRequest, Request};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;
use crate::domain::DomainError;

/// An extractor that deserializes JSON and validates it.
///
/// # Usage
///
/// ```ignore
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 1, max = 50))]
///     username: String,
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateUser>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Same as [`ValidatedJson`] for `application/x-www-form-urlencoded` bodies.
pub struct ValidatedForm<T>(pub T);

fn validation_detail(errors: &ValidationErrors) -> String {
    let mut field_errors: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    field_errors.sort();

    if field_errors.is_empty() {
        "Validation failed".to_string()
    } else {
        field_errors.join("; ")
    }
}

fn validate<T: Validate>(value: T) -> Result<T, ApiError> {
    value
        .validate()
        .map_err(|errors| ApiError::from(DomainError::Validation(validation_detail(&errors))))?;
    Ok(value)
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::unprocessable(format!("Invalid JSON: {}", rejection.body_text()))
            })?;

        Ok(ValidatedJson(validate(value)?))
    }
}

impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::unprocessable(format!("Invalid form: {}", rejection.body_text()))
            })?;

        Ok(ValidatedForm(validate(value)?))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        name: String,
        #[validate(range(min = 1, max = 100))]
        age: u32,
    }

    async fn json_handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    async fn form_handler(ValidatedForm(_body): ValidatedForm<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/json", post(json_handler))
            .route("/form", post(form_handler))
    }

    async fn send(uri: &str, content_type: &str, body: impl Into<Body>) -> StatusCode {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(body.into())
            .unwrap();

        app().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"name": "Alice", "age": 30}).to_string();
        assert_eq!(send("/json", "application/json", body).await, StatusCode::OK);
        assert_eq!(
            send("/form", "application/x-www-form-urlencoded", "name=Alice&age=30").await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn invalid_json_returns_422() {
        assert_eq!(
            send("/json", "application/json", "not json").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            send("/form", "application/x-www-form-urlencoded", "name=Alice").await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn validation_failure_returns_422() {
        let body = serde_json::json!({"name": "", "age": 0}).to_string();
        assert_eq!(
            send("/json", "application/json", body).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn validation_failure_carries_field_detail() {
        let req = Request::builder()
            .method("POST")
            .uri("/json")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::json!({"name": "Alice", "age": 0}).to_string()))
            .unwrap();
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "age: range");
    }

    #[test]
    fn detail_lists_every_field() {
        let errors = TestBody {
            name: String::new(),
            age: 0,
        }
        .validate()
        .unwrap_err();

        let detail = validation_detail(&errors);
        assert!(detail.contains("age: range"));
        assert!(detail.contains("name: length"));
    }
}
