use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use super::AccountStore;
use crate::models::Account;

/// In-process store keyed by email. Intended for tests and local runs.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<String, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<Account, sqlx::Error> {
        match self.accounts.entry(email.to_string()) {
            Entry::Occupied(_) => Err(sqlx::Error::Protocol(format!(
                "account already exists: {email}"
            ))),
            Entry::Vacant(slot) => {
                let account = Account {
                    id: Uuid::now_v7(),
                    email: email.to_string(),
                    password_hash: password_hash.to_string(),
                    reset_token: None,
                    reset_token_expiry: None,
                    created_at: Utc::now(),
                };
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, sqlx::Error> {
        Ok(self.accounts.get(email).map(|a| a.value().clone()))
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, sqlx::Error> {
        for mut entry in self.accounts.iter_mut() {
            if entry.id == id {
                entry.reset_token = Some(token.to_string());
                entry.reset_token_expiry = Some(expires_at);
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn find_by_valid_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Account>, sqlx::Error> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.accepts_token(token, now))
            .map(|a| a.value().clone()))
    }

    async fn redeem(
        &self,
        token: &str,
        now: DateTime<Utc>,
        password_hash: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        // The shard write lock is held from the check through the clear.
        for mut entry in self.accounts.iter_mut() {
            if entry.accepts_token(token, now) {
                entry.password_hash = password_hash.to_string();
                entry.reset_token = None;
                entry.reset_token_expiry = None;
                return Ok(Some(entry.value().clone()));
            }
        }
        Ok(None)
    }
}
