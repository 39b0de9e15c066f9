#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Point the process at a fresh temp database and a fixed JWT secret
/// before the config/pool singletons initialize. Each test binary is its
/// own process, so binaries never share state.
pub fn setup() -> Router {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .subsec_nanos();
        let db_path = std::env::temp_dir().join(format!(
            "karma-api-test-{}-{}.db",
            std::process::id(),
            nanos
        ));
        std::env::set_var(
            "DATABASE_URL",
            format!("sqlite://{}?mode=rwc", db_path.display()),
        );
        std::env::set_var("KARMA_JWT_SECRET", "integration-test-secret");
    });
    karma_api::app()
}

/// Unique username per call so parallel tests never collide.
pub fn unique(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!(
        "{}-{}-{}",
        prefix,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Drive one request through the router and decode the JSON body.
pub async fn call(
    app: &Router,
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

/// Register an account; role `None` exercises the default (user).
pub async fn register(
    app: &Router,
    username: &str,
    password: &str,
    name: &str,
    role: Option<i64>,
) -> (StatusCode, Value) {
    let mut body = json!({
        "username": username,
        "password": password,
        "name": name,
    });
    if let Some(role) = role {
        body["role"] = json!(role);
    }
    call(app, "POST", "/register", None, Some(body)).await
}

pub async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    call(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

/// Register + login, returning the bearer token.
pub async fn register_and_login(
    app: &Router,
    username: &str,
    password: &str,
    name: &str,
    role: Option<i64>,
) -> String {
    let (status, _) = register(app, username, password, name, role).await;
    assert_eq!(status, StatusCode::OK, "registration failed for {}", username);

    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed for {}", username);
    body["token"].as_str().expect("token").to_string()
}

/// Current reputation as seen through a fresh login.
pub async fn reputation(app: &Router, username: &str, password: &str) -> f64 {
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK);
    body["reputation"].as_f64().expect("reputation")
}
