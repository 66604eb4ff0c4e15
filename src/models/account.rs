use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// True while `token` matches the pending reset and `now` is before its expiry.
    pub fn accepts_token(&self, token: &str, now: DateTime<Utc>) -> bool {
        match (&self.reset_token, self.reset_token_expiry) {
            (Some(stored), Some(expiry)) => stored == token && now < expiry,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn account(token: Option<&str>, expiry: Option<DateTime<Utc>>) -> Account {
        Account {
            id: Uuid::now_v7(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            reset_token: token.map(str::to_string),
            reset_token_expiry: expiry,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_pending_reset_accepts_nothing() {
        let acct = account(None, None);
        assert!(!acct.accepts_token("", Utc::now()));
        assert!(!acct.accepts_token("abc", Utc::now()));
    }

    #[test]
    fn expiry_is_exclusive() {
        let now = Utc::now();
        let acct = account(Some("abc"), Some(now + Duration::seconds(1)));
        assert!(acct.accepts_token("abc", now));
        assert!(!acct.accepts_token("abc", now + Duration::seconds(1)));
        assert!(!acct.accepts_token("abd", now));
        assert!(!acct.accepts_token("ABC", now));
    }
}
