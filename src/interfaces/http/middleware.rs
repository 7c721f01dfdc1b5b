//! Bearer-token authentication for Axum
//!
//! Protected handlers take [`CurrentUser`] as an argument; a request
//! without a valid token is rejected before the handler body runs.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
};

use crate::domain::Principal;
use crate::infrastructure::TokenService;
use crate::interfaces::http::common::ApiError;

const CREDENTIALS_DETAIL: &str = "Could not validate credentials";

/// Authentication error types
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let reason = match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidToken => "invalid_token",
        };
        metrics::counter!("auth_failures_total", "reason" => reason).increment(1);

        ApiError::bearer_unauthorized(CREDENTIALS_DETAIL).into_response()
    }
}

/// The authenticated caller of a protected endpoint.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Principal);

/// Token from `Authorization: Bearer <token>`; the scheme is case-insensitive.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let token = extract_token(&parts.headers).ok_or(AuthError::MissingToken)?;
        let principal = tokens.verify_access_token(token, || AuthError::InvalidToken)?;
        Ok(CurrentUser(principal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{HeaderValue, Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use chrono::Duration;
    use tower::ServiceExt;

    use crate::infrastructure::JwtConfig;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(JwtConfig::default()).unwrap())
    }

    async fn whoami(CurrentUser(principal): CurrentUser) -> String {
        principal.subject
    }

    async fn call(tokens: Arc<TokenService>, authorization: Option<&str>) -> Response {
        let app = Router::new().route("/me", get(whoami)).with_state(tokens);

        let mut req = Request::builder().uri("/me");
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
    }

    fn assert_challenged(response: &Response) {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn extract_token_variants() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(extract_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_token(&headers), None);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let tokens = tokens();
        let token = tokens.create_access_token("ann@example.com", None).unwrap();

        let response = call(tokens, Some(&format!("Bearer {}", token))).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_is_challenged() {
        assert_challenged(&call(tokens(), None).await);
    }

    #[tokio::test]
    async fn wrong_scheme_is_challenged() {
        let tokens = tokens();
        let token = tokens.create_access_token("ann@example.com", None).unwrap();
        assert_challenged(&call(tokens, Some(&format!("Token {}", token))).await);
    }

    #[tokio::test]
    async fn expired_token_is_challenged() {
        let tokens = tokens();
        let token = tokens
            .create_access_token("ann@example.com", Some(Duration::seconds(-1)))
            .unwrap();
        assert_challenged(&call(tokens, Some(&format!("Bearer {}", token))).await);
    }

    #[tokio::test]
    async fn garbage_token_is_challenged() {
        assert_challenged(&call(tokens(), Some("Bearer not.a.jwt")).await);
    }
}
