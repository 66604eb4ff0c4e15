//! Reset-token issuance and redemption.
//!
//! An account has at most one pending reset: a token plus an absolute expiry,
//! always written and cleared together. Expiry is checked at query time against
//! the injected [`Clock`]; nothing sweeps stale tokens.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::{password, token};
use crate::clock::Clock;
use crate::config::Config;
use crate::email::{Mailer, templates};
use crate::error::ResetError;
use crate::store::AccountStore;

#[derive(Debug, Clone)]
pub struct ResetSettings {
    pub base_url: String,
    pub token_ttl: Duration,
    pub store_timeout: Duration,
    pub mail_timeout: Duration,
}

impl ResetSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            token_ttl: config.token_ttl,
            store_timeout: config.store_timeout,
            mail_timeout: config.mail_timeout,
        }
    }
}

/// What a successful issuance reports back. Deliberately carries no token.
#[derive(Debug, Clone)]
pub struct IssuedReset {
    pub account_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

pub struct ResetService {
    store: Arc<dyn AccountStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
    settings: ResetSettings,
}

impl ResetService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
        settings: ResetSettings,
    ) -> Self {
        Self {
            store,
            mailer,
            clock,
            settings,
        }
    }

    /// Issue a fresh token for `email`, replacing any pending one, and mail the link.
    ///
    /// The token is persisted before dispatch. If dispatch fails the token stays
    /// redeemable until it expires.
    pub async fn request_reset(&self, email: &str) -> Result<IssuedReset, ResetError> {
        let account = self
            .store_call(self.store.find_by_email(email))
            .await?
            .ok_or(ResetError::NotFound)?;

        let ttl = chrono::Duration::from_std(self.settings.token_ttl)
            .map_err(|e| ResetError::Internal(format!("Invalid token TTL: {e}")))?;
        let token = token::generate_reset_token();
        let expires_at = self.clock.now() + ttl;

        let saved = self
            .store_call(self.store.set_reset_token(account.id, &token, expires_at))
            .await?;
        if !saved {
            return Err(ResetError::NotFound);
        }

        tracing::info!(account_id = %account.id, %expires_at, "Password reset issued");

        let link = templates::reset_url(&self.settings.base_url, &token);
        let body = templates::render_password_reset(&link);
        let sent = tokio::time::timeout(
            self.settings.mail_timeout,
            self.mailer
                .send(&account.email, templates::PASSWORD_RESET_SUBJECT, &body),
        )
        .await;

        match sent {
            Ok(Ok(())) => Ok(IssuedReset {
                account_id: account.id,
                expires_at,
            }),
            Ok(Err(e)) => Err(ResetError::DispatchFailed(e)),
            Err(_) => Err(ResetError::DispatchFailed(format!(
                "timed out after {}s",
                self.settings.mail_timeout.as_secs()
            ))),
        }
    }

    /// Redeem `token`, storing a hash of `new_password` and clearing the token.
    ///
    /// Never-issued, expired and already-used tokens all yield
    /// [`ResetError::InvalidOrExpired`].
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<Uuid, ResetError> {
        // Skip the Argon2 work for tokens that cannot match.
        self.reject_unmatchable(token).await?;

        let hash = password::hash_blocking(new_password.to_string())
            .await
            .map_err(ResetError::Internal)?;

        let account = self
            .store_call(self.store.redeem(token, self.clock.now(), &hash))
            .await?
            .ok_or(ResetError::InvalidOrExpired)?;

        tracing::info!(account_id = %account.id, "Password reset completed");
        Ok(account.id)
    }

    async fn reject_unmatchable(&self, token: &str) -> Result<(), ResetError> {
        if !token::is_well_formed(token) {
            return Err(ResetError::InvalidOrExpired);
        }
        self.store_call(self.store.find_by_valid_token(token, self.clock.now()))
            .await?
            .map(|_| ())
            .ok_or(ResetError::InvalidOrExpired)
    }

    async fn store_call<T, F>(&self, fut: F) -> Result<T, ResetError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.settings.store_timeout, fut).await {
            Ok(result) => result.map_err(ResetError::from),
            Err(_) => Err(ResetError::Internal(format!(
                "store call timed out after {}s",
                self.settings.store_timeout.as_secs()
            ))),
        }
    }
}
