//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, BlogService, UserService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::{PasswordManager, TokenService};
use crate::interfaces::http::common::{ErrorBody, MessageResponse};

use super::modules::health::HealthState;
use super::modules::metrics::{http_metrics_middleware, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, blogs, health, metrics, users};

/// Router state shared by every handler.
/// Handlers extract the piece they need via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub blogs: Arc<BlogService>,
    pub health: HealthState,
    pub metrics: MetricsState,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.tokens)
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.auth)
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.users)
    }
}

impl FromRef<AppState> for Arc<BlogService> {
    fn from_ref(s: &AppState) -> Self {
        Arc::clone(&s.blogs)
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        s.metrics.clone()
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from POST /authentication/generate_token",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::index,
        health::health_check,
        metrics::prometheus_metrics,
        // Auth
        auth::login,
        auth::generate_token,
        auth::get_current_user,
        // Users
        users::create_user,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::create_password,
        users::check_password,
        // Blogs
        blogs::create_blog,
        blogs::list_blogs,
        blogs::get_blog,
        blogs::update_blog,
        blogs::delete_blog,
    ),
    components(
        schemas(
            // Common
            ErrorBody,
            MessageResponse,
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::TokenRequest,
            auth::TokenResponse,
            // Users
            users::UserResponse,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            users::CreatePasswordRequest,
            users::CredentialResponse,
            users::PasswordCheckResponse,
            // Blogs
            blogs::BlogRequest,
            blogs::BlogResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Welcome page, health check and metrics"),
        (name = "Authentication", description = "Login, bearer token issuance and current user"),
        (name = "Users", description = "User accounts and password credentials"),
        (name = "Blogs", description = "Blog post management"),
    ),
    info(
        title = "Blog Service API",
        version = "0.1.0",
        description = "CRUD blog backend with bearer-token authentication",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    repos: Arc<dyn RepositoryProvider>,
    tokens: Arc<TokenService>,
    passwords: PasswordManager,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let state = AppState {
        tokens: tokens.clone(),
        auth: Arc::new(AuthService::new(repos.clone(), tokens, passwords)),
        users: Arc::new(UserService::new(repos.clone(), passwords)),
        blogs: Arc::new(BlogService::new(repos)),
        health: HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        },
        metrics: MetricsState {
            handle: prometheus_handle,
        },
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Login endpoints are public; /me requires a bearer token
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/generate_token", post(auth::generate_token))
        .route("/me", get(auth::get_current_user));

    // create_user is public; everything else requires a bearer token
    let user_routes = Router::new()
        .route("/create_user", post(users::create_user))
        .route("/all_users", get(users::list_users))
        .route("/{user_id}", get(users::get_user))
        .route("/update_user/{user_id}", put(users::update_user))
        .route("/delete_user/{user_id}", delete(users::delete_user))
        .route("/password/create", post(users::create_password))
        .route("/password/check/{user_id}", get(users::check_password));

    let blog_routes = Router::new()
        .route("/create", post(blogs::create_blog))
        .route("/all_blogs", get(blogs::list_blogs))
        .route("/{blog_id}", get(blogs::get_blog))
        .route("/update/{blog_id}", put(blogs::update_blog))
        .route("/delete/{blog_id}", delete(blogs::delete_blog));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        // Resources
        .nest("/authentication", auth_routes)
        .nest("/users", user_routes)
        .nest("/blog", blog_routes)
        .with_state(state)
        // Middleware
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
