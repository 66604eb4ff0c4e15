pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Account;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;

/// Persistent account records. Each method is atomic per record.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn create(&self, email: &str, password_hash: &str) -> Result<Account, sqlx::Error>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error>;

    /// Replaces any pending token. Returns false if the account no longer exists.
    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error>;

    async fn find_by_valid_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, sqlx::Error>;

    /// Compare-and-clear: if `token` is pending and unexpired at `now`, store
    /// `password_hash` and clear the token pair, returning the updated account.
    async fn redeem(
        &self,
        token: &str,
        now: DateTime<Utc>,
        password_hash: &str,
    ) -> Result<Option<Account>, sqlx::Error>;
}
