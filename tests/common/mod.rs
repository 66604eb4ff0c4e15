use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use pwreset::auth::password;
use pwreset::clock::ManualClock;
use pwreset::config::{Config, UnknownEmailMode};
use pwreset::email::MemoryMailer;
use pwreset::store::{AccountStore, MemoryAccountStore};

/// A running server backed by in-memory collaborators.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryAccountStore>,
    pub mailer: Arc<MemoryMailer>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Seed an account with the given plaintext password.
    pub async fn seed(&self, email: &str, plaintext: &str) {
        let hash = password::hash(plaintext).expect("hash failed");
        self.store.create(email, &hash).await.expect("seed failed");
    }

    pub async fn forgot_password(&self, email: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/forgot-password"))
            .json(&json!({ "email": email }))
            .send()
            .await
            .expect("forgot-password request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(&format!("/api/reset-password/{token}")))
            .json(&json!({ "password": password }))
            .send()
            .await
            .expect("reset-password request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Request a reset for `email` and return the token from the mailed link.
    pub async fn issue_token(&self, email: &str) -> String {
        let (body, status) = self.forgot_password(email).await;
        assert_eq!(status, StatusCode::OK, "forgot-password failed: {body}");
        self.mailer.last_token().expect("no reset link mailed")
    }

    pub async fn password_hash(&self, email: &str) -> String {
        self.store
            .find_by_email(email)
            .await
            .unwrap()
            .expect("account missing")
            .password_hash
    }
}

pub fn test_config(unknown_email: UnknownEmailMode) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        base_url: "http://reset.test".to_string(),
        token_ttl: Duration::from_secs(300),
        store_timeout: Duration::from_secs(5),
        mail_timeout: Duration::from_secs(5),
        unknown_email,
        log_level: "warn".to_string(),
        smtp: None,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(UnknownEmailMode::Reveal).await
}

pub async fn spawn_app_with(unknown_email: UnknownEmailMode) -> TestApp {
    let config = test_config(unknown_email);

    let store = Arc::new(MemoryAccountStore::new());
    let mailer = Arc::new(MemoryMailer::new());
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let state = pwreset::build_state(&config, store.clone(), mailer.clone(), clock.clone());
    let app = pwreset::build_app(state);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
        mailer,
        clock,
    }
}
