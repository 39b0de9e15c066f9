// POST /login - authenticate and issue an access token

use argon2::{password_hash::PasswordHash, Argon2, PasswordVerifier};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::database::{account, Database};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login(Json(body): Json<LoginRequest>) -> Result<Json<Value>, ApiError> {
    let username = body.username.filter(|s| !s.is_empty());
    let password = body.password.filter(|s| !s.is_empty());

    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::validation("Missing username or password"));
    };

    let pool = Database::pool().await?;
    let account = account::find_by_username(&pool, &username).await?;

    // Same response for unknown username and wrong password
    let Some(account) = account.filter(|a| verify_password(&password, &a.password)) else {
        return Err(ApiError::authentication("Invalid credentials"));
    };

    let token = generate_jwt(Claims::new(account.id))?;
    tracing::info!(account_id = account.id, %username, "login succeeded");

    Ok(Json(json!({
        "message": "Logged in!",
        "username": account.username,
        "name": account.name,
        "role": account.role,
        "reputation": account.reputation,
        "token": token,
    })))
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
