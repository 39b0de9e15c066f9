//! Karma gate: role membership check plus reputation feedback.
//!
//! Every protected route declares its allowed-role set; the gate rewards
//! permitted access with a small reputation bump and charges a full point
//! for each denied attempt, so a strongly negative score marks an account
//! probing endpoints it has no business calling.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use sqlx::SqlitePool;

use crate::database::{account, Database, DatabaseError};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::types::Role;

/// Reputation delta for a permitted call.
pub const KARMA_REWARD: f64 = 0.1;
/// Reputation delta for a denied call.
pub const KARMA_PENALTY: f64 = -1.0;

/// Allowed-role set carried as route-layer state.
#[derive(Clone, Copy, Debug)]
pub struct AllowedRoles(pub &'static [Role]);

/// Outcome of a gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allow,
    Deny,
    NotFound,
}

/// Route-layer middleware. Runs after `jwt_auth_middleware`, which injects
/// the verified `AuthUser` extension.
pub async fn reputation_gate(
    State(allowed): State<AllowedRoles>,
    axum::Extension(user): axum::Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let pool = Database::pool().await?;

    match authorize(&pool, user.account_id, allowed.0).await? {
        Gate::Allow => Ok(next.run(request).await),
        Gate::Deny => Err(ApiError::authorization(
            "You do not have permission to access this resource. Your reputation was reduced",
        )),
        Gate::NotFound => Err(ApiError::not_found("User not found")),
    }
}

/// Core decision: look up the caller's role and commit the reputation
/// delta atomically with the check. An unresolvable account gets no
/// delta, since there is no row to charge.
pub async fn authorize(
    pool: &SqlitePool,
    account_id: i64,
    allowed: &[Role],
) -> Result<Gate, DatabaseError> {
    let Some(stored_role) = account::find_role(pool, account_id).await? else {
        return Ok(Gate::NotFound);
    };

    // An out-of-range stored role never matches an allowed set.
    let permitted = Role::from_i64(stored_role)
        .map(|role| allowed.contains(&role))
        .unwrap_or(false);

    if permitted {
        account::adjust_reputation(pool, account_id, KARMA_REWARD).await?;
        tracing::info!(account_id, "access granted, reputation +{}", KARMA_REWARD);
        Ok(Gate::Allow)
    } else {
        account::adjust_reputation(pool, account_id, KARMA_PENALTY).await?;
        tracing::warn!(
            account_id,
            stored_role,
            "access denied, reputation {}",
            KARMA_PENALTY
        );
        Ok(Gate::Deny)
    }
}
