// Role-gated landing pages. Each one just echoes the caller's account
// details; the interesting part (role check + karma delta) happens in the
// gate before these run.

use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::database::{account, Database};
use crate::error::ApiError;
use crate::middleware::AuthUser;

pub async fn admin_page(Extension(user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    page(user, "Welcome to Admin page!").await
}

pub async fn mod_page(Extension(user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    page(user, "Welcome to Moderator page!").await
}

pub async fn user_page(Extension(user): Extension<AuthUser>) -> Result<Json<Value>, ApiError> {
    page(user, "Welcome to User page!").await
}

async fn page(user: AuthUser, message: &str) -> Result<Json<Value>, ApiError> {
    let pool = Database::pool().await?;
    let account = account::find_by_id(&pool, user.account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(json!({
        "message": message,
        "username": account.username,
        "name": account.name,
        "role": account.role,
        "reputation": account.reputation,
    })))
}
