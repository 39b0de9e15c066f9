// POST /chat - natural-language query over the account table.
//
// Gated to admins and moderators by the karma gate before this handler
// runs. The translated SQL executes verbatim against live data, with no
// statement allowlist and no read-only enforcement. That is the riskiest
// contract in the system; it is kept behind the TranslatorBridge plus one
// repository method so a policy layer can be slotted in later.

use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::{account, Database};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::translator::TranslatorBridge;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: Option<String>,
}

pub async fn chat(
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<Value>, ApiError> {
    let pool = Database::pool().await?;

    let caller = account::find_by_id(&pool, user.account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let Some(query) = body.query.filter(|q| !q.trim().is_empty()) else {
        return Err(ApiError::validation("Missing query"));
    };

    let bridge = TranslatorBridge::from_config()?;
    let sql = bridge.translate(&query).await?;
    tracing::debug!(account_id = caller.id, %sql, "translated query");

    let result = account::select_raw(&pool, &sql)
        .await
        .map_err(|e| ApiError::execution(format!("Translated query failed: {}", e)))?;
    tracing::debug!(rows = result.len(), "query executed");

    Ok(Json(json!({
        "caller_name": caller.name,
        "translated_query": sql,
        "result": result,
    })))
}
