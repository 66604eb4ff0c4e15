use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::AccountStore;
use crate::db;
use crate::models::Account;

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<Account, sqlx::Error> {
        db::accounts::create(&self.pool, email, password_hash).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        db::accounts::find_by_email(&self.pool, email).await
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        db::accounts::set_reset_token(&self.pool, id, token, expires_at).await
    }

    async fn find_by_valid_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, sqlx::Error> {
        db::accounts::find_by_valid_token(&self.pool, token, now).await
    }

    async fn redeem(
        &self,
        token: &str,
        now: DateTime<Utc>,
        password_hash: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        db::accounts::redeem(&self.pool, token, now, password_hash).await
    }
}
