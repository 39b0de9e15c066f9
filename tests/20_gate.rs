mod common;

use anyhow::Result;
use axum::http::StatusCode;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[tokio::test]
async fn denied_calls_charge_one_point_each() -> Result<()> {
    let app = common::setup();
    let username = common::unique("plain");
    let token = common::register_and_login(&app, &username, "pw1", "Plain User", None).await;

    // Fresh account starts at zero
    assert_close(common::reputation(&app, &username, "pw1").await, 0.0);

    let (status, body) = common::call(&app, "GET", "/admin", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "You do not have permission to access this resource. Your reputation was reduced"
    );
    assert_close(common::reputation(&app, &username, "pw1").await, -1.0);

    let (status, _) = common::call(&app, "GET", "/admin", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_close(common::reputation(&app, &username, "pw1").await, -2.0);

    Ok(())
}

#[tokio::test]
async fn permitted_calls_reward_a_tenth() -> Result<()> {
    let app = common::setup();
    let username = common::unique("admin");
    let token = common::register_and_login(&app, &username, "pw1", "Admin", Some(0)).await;

    let (status, body) = common::call(&app, "GET", "/admin", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Admin page!");
    assert_eq!(body["username"], username.as_str());
    assert_eq!(body["role"], 0);

    assert_close(common::reputation(&app, &username, "pw1").await, 0.1);

    Ok(())
}

#[tokio::test]
async fn moderator_reaches_mod_but_not_admin() -> Result<()> {
    let app = common::setup();
    let username = common::unique("mod");
    let token = common::register_and_login(&app, &username, "pw1", "Mod", Some(1)).await;

    let (status, body) = common::call(&app, "GET", "/mod", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Moderator page!");

    let (status, _) = common::call(&app, "GET", "/admin", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // +0.1 for /mod, -1.0 for /admin
    assert_close(common::reputation(&app, &username, "pw1").await, 0.1 - 1.0);

    Ok(())
}

#[tokio::test]
async fn user_page_admits_every_role() -> Result<()> {
    let app = common::setup();

    for role in [0, 1, 2] {
        let username = common::unique("any");
        let token =
            common::register_and_login(&app, &username, "pw1", "Any Role", Some(role)).await;

        let (status, body) = common::call(&app, "GET", "/user", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK, "role {} should reach /user", role);
        assert_eq!(body["message"], "Welcome to User page!");
        assert_eq!(body["role"], role);
    }

    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_or_garbage_tokens() -> Result<()> {
    let app = common::setup();

    let (status, _) = common::call(&app, "GET", "/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::call(&app, "GET", "/user", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}
