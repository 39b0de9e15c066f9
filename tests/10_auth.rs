mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn register_then_login_round_trip() -> Result<()> {
    let app = common::setup();
    let username = common::unique("alice");

    let (status, body) = common::register(&app, &username, "pw1", "Alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User created successfully");

    let (status, body) = common::login(&app, &username, "pw1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged in!");
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["role"], 2);
    assert_eq!(body["reputation"].as_f64(), Some(0.0));
    assert!(!body["token"].as_str().unwrap_or("").is_empty());
    // The stored hash never leaves the server
    assert!(body.get("password").is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected_without_a_new_record() -> Result<()> {
    let app = common::setup();
    let username = common::unique("dup");

    let (status, _) = common::register(&app, &username, "pw1", "First", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::register(&app, &username, "pw2", "Second", Some(0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already taken");

    // First registration still wins: original password and role intact
    let (status, body) = common::login(&app, &username, "pw1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "First");
    assert_eq!(body["role"], 2);

    Ok(())
}

#[tokio::test]
async fn registration_requires_all_fields() -> Result<()> {
    let app = common::setup();

    let (status, body) = common::call(
        &app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": common::unique("incomplete") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing username, password, or name");

    Ok(())
}

#[tokio::test]
async fn registration_rejects_unknown_roles() -> Result<()> {
    let app = common::setup();

    let (status, body) =
        common::register(&app, &common::unique("badrole"), "pw", "Bad Role", Some(7)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role");

    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let app = common::setup();

    let (status, body) = common::call(
        &app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": "whoever" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing username or password");

    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() -> Result<()> {
    let app = common::setup();
    let username = common::unique("creds");

    let (status, _) = common::register(&app, &username, "right", "Creds", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::login(&app, &username, "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, _) = common::login(&app, &common::unique("ghost"), "pw").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn health_and_root_respond() -> Result<()> {
    let app = common::setup();

    let (status, body) = common::call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = common::call(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "karma-api");

    Ok(())
}
