// POST /register - create a new account

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::{account, Database};
use crate::error::ApiError;
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<i64>,
}

pub async fn register(Json(body): Json<RegisterRequest>) -> Result<Json<Value>, ApiError> {
    let username = body.username.filter(|s| !s.is_empty());
    let password = body.password.filter(|s| !s.is_empty());
    let name = body.name.filter(|s| !s.is_empty());

    let (Some(username), Some(password), Some(name)) = (username, password, name) else {
        return Err(ApiError::validation("Missing username, password, or name"));
    };

    let role = body.role.unwrap_or_else(|| Role::User.as_i64());
    if Role::from_i64(role).is_none() {
        return Err(ApiError::validation("Invalid role"));
    }

    let pool = Database::pool().await?;

    if account::find_by_username(&pool, &username).await?.is_some() {
        return Err(ApiError::conflict("Username already taken"));
    }

    let password_hash = hash_password(&password)?;

    match account::insert(&pool, role, &username, &password_hash, &name).await {
        Ok(id) => {
            tracing::info!(account_id = id, %username, role, "account created");
            Ok(Json(json!({ "message": "User created successfully" })))
        }
        // Lost a registration race for the same username
        Err(err) if err.is_unique_violation() => {
            Err(ApiError::conflict("Username already taken"))
        }
        Err(err) => Err(err.into()),
    }
}

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))
}
