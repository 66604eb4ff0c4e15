use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Account;

pub async fn create(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Overwrites any pending reset. Token and expiry are always written together.
pub async fn set_reset_token(
    pool: &PgPool,
    id: Uuid,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE accounts SET reset_token = $2, reset_token_expiry = $3 WHERE id = $1",
    )
    .bind(id)
    .bind(token)
    .bind(expires_at)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn find_by_valid_token(
    pool: &PgPool,
    token: &str,
    now: DateTime<Utc>,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT * FROM accounts WHERE reset_token = $1 AND reset_token_expiry > $2",
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await
}

/// Claims the token and swaps the password in one statement, so two concurrent
/// redemptions of the same token cannot both match.
pub async fn redeem(
    pool: &PgPool,
    token: &str,
    now: DateTime<Utc>,
    password_hash: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "UPDATE accounts
         SET password_hash = $3, reset_token = NULL, reset_token_expiry = NULL
         WHERE reset_token = $1 AND reset_token_expiry > $2
         RETURNING *",
    )
    .bind(token)
    .bind(now)
    .bind(password_hash)
    .fetch_optional(pool)
    .await
}
