use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::{header::ALLOW, HeaderValue, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::BackendClient;
use crate::error::ApiError;
use crate::handlers::{auth, categories, comments, likes, posts, users};
use crate::middleware::Authorizer;

/// Shared, immutable per-process state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub authorizer: Arc<Authorizer>,
}

impl AppState {
    pub fn new(backend: BackendClient, authorizer: Authorizer) -> Self {
        Self {
            backend,
            authorizer: Arc::new(authorizer),
        }
    }
}

impl FromRef<AppState> for BackendClient {
    fn from_ref(state: &AppState) -> Self {
        state.backend.clone()
    }
}

impl FromRef<AppState> for Arc<Authorizer> {
    fn from_ref(state: &AppState) -> Self {
        state.authorizer.clone()
    }
}

/// Layer options applied around the route table
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    pub cors_origins: Vec<String>,
    pub request_logging: bool,
}

pub fn router(state: AppState, options: &RouterOptions) -> Router {
    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/v1", v1_routes())
        .fallback(route_not_found)
        .layer(map_response(method_not_allowed_envelope))
        .with_state(state);

    if let Some(cors) = cors_layer(&options.cors_origins) {
        app = app.layer(cors);
    }
    if options.request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn v1_routes() -> Router<AppState> {
    Router::new()
        // Public auth
        .route("/auth/register", post(auth::register))
        .route("/auth/verify", post(auth::verify))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify-forgot-password", post(auth::forgot_password))
        // Users
        .route("/users", get(users::list).post(users::create))
        .route("/users/email/:email", get(users::get_by_email))
        .route("/users/:id", get(users::get).put(users::update).delete(users::delete))
        // Categories
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
        // Posts
        .route("/posts", get(posts::list).post(posts::create))
        .route("/posts/:id", get(posts::get).put(posts::update).delete(posts::delete))
        // Comments
        .route("/comments", get(comments::list).post(comments::create))
        .route(
            "/comments/:id",
            get(comments::get).put(comments::update).delete(comments::delete),
        )
        // Likes
        .route("/likes", get(likes::list).post(likes::create_or_update))
        .route("/likes/get-likes-and-dislikes", get(likes::likes_and_dislikes))
        .route("/likes/:id", get(likes::get).put(likes::update).delete(likes::delete))
}

/// `*` allows any origin, an empty list installs no CORS layer
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        return Some(layer.allow_origin(Any));
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(layer.allow_origin(allowed))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Blog API Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/v1/auth/{register,verify,login,verify-forgot-password}",
            "users": "/v1/users[/:id], /v1/users/email/:email",
            "categories": "/v1/categories[/:id]",
            "posts": "/v1/posts[/:id]",
            "comments": "/v1/comments[/:id]",
            "likes": "/v1/likes[/:id], /v1/likes/get-likes-and-dislikes",
        }
    }))
}

/// Liveness only; backends are not contacted
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    }))
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("route not found")
}

/// The router answers a known path with an unrouted method with a bare 405
async fn method_not_allowed_envelope(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let mut envelope = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = response.headers().get(ALLOW) {
        envelope.headers_mut().insert(ALLOW, allow.clone());
    }
    envelope
}
