//! Account repository for the `user_details` table.
//!
//! Reputation changes are single-statement atomic updates so concurrent
//! gate decisions never lose a delta to a read-modify-write race.

use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};

use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub role: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
    pub reputation: f64,
}

/// Insert a new account, returning its id. A duplicate username surfaces
/// as a unique-constraint error.
pub async fn insert(
    pool: &SqlitePool,
    role: i64,
    username: &str,
    password_hash: &str,
    name: &str,
) -> Result<i64, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO user_details (role, username, password, name, reputation) VALUES (?, ?, ?, ?, 0)",
    )
    .bind(role)
    .bind(username)
    .bind(password_hash)
    .bind(name)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<Account>, DatabaseError> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, role, username, password, name, reputation FROM user_details WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Account>, DatabaseError> {
    let account = sqlx::query_as::<_, Account>(
        "SELECT id, role, username, password, name, reputation FROM user_details WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}

pub async fn find_role(pool: &SqlitePool, id: i64) -> Result<Option<i64>, DatabaseError> {
    let role = sqlx::query_scalar::<_, i64>("SELECT role FROM user_details WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(role)
}

/// Apply a reputation delta as one atomic UPDATE. Returns the number of
/// affected rows (0 when the account no longer exists).
pub async fn adjust_reputation(
    pool: &SqlitePool,
    id: i64,
    delta: f64,
) -> Result<u64, DatabaseError> {
    let result = sqlx::query("UPDATE user_details SET reputation = reputation + ? WHERE id = ?")
        .bind(delta)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Execute translator-produced SQL verbatim and collect all rows as JSON
/// maps. No allowlist and no read-only enforcement at this layer; the
/// statement runs exactly as emitted (known gap, isolated here so a
/// harder policy can be added without touching callers).
pub async fn select_raw(
    pool: &SqlitePool,
    sql: &str,
) -> Result<Vec<Map<String, Value>>, DatabaseError> {
    let rows = sqlx::query(sql).fetch_all(pool).await?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row_to_json(&row)?);
    }

    Ok(results)
}

/// Convert one row to a JSON map, driven by each value's storage class.
fn row_to_json(row: &SqliteRow) -> Result<Map<String, Value>, DatabaseError> {
    let mut map = Map::new();

    for i in 0..row.len() {
        let column_name = row.column(i).name().to_string();
        let raw = row
            .try_get_raw(i)
            .map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        let json_value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => row
                    .try_get::<i64, _>(i)
                    .map(|v| Value::Number(v.into()))
                    .unwrap_or(Value::Null),
                "REAL" => row
                    .try_get::<f64, _>(i)
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
                "TEXT" => row
                    .try_get::<String, _>(i)
                    .map(Value::String)
                    .unwrap_or(Value::Null),
                // BLOB and anything else are not meaningful as JSON here
                _ => Value::Null,
            }
        };

        map.insert(column_name, json_value);
    }

    Ok(map)
}
