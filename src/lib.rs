pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod translator;
pub mod types;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use middleware::{jwt_auth_middleware, reputation_gate, AllowedRoles};
use types::{roles, Role};

/// Build the full application router.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        // Protected, each with its declared allowed-role set
        .merge(gated(
            Router::new().route("/chat", post(handlers::chat)),
            roles::PRIVILEGED,
        ))
        .merge(gated(
            Router::new().route("/admin", get(handlers::admin_page)),
            roles::ADMIN_ONLY,
        ))
        .merge(gated(
            Router::new().route("/mod", get(handlers::mod_page)),
            roles::PRIVILEGED,
        ))
        .merge(gated(
            Router::new().route("/user", get(handlers::user_page)),
            roles::EVERYONE,
        ))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Wrap routes with JWT validation followed by the karma gate. The gate
/// layer is added first so the auth layer runs before it.
fn gated(routes: Router, allowed: &'static [Role]) -> Router {
    routes
        .route_layer(axum::middleware::from_fn_with_state(
            AllowedRoles(allowed),
            reputation_gate,
        ))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "karma-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> impl IntoResponse {
    match database::Database::health_check().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "message": e.to_string() })),
        ),
    }
}
