pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod reset;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::clock::Clock;
use crate::config::Config;
use crate::email::{LogMailer, Mailer, SmtpMailer};
use crate::reset::{ResetService, ResetSettings};
use crate::state::{AppState, SharedState};
use crate::store::AccountStore;

/// Wire the reset service from its collaborators.
pub fn build_state(
    config: &Config,
    store: Arc<dyn AccountStore>,
    mailer: Arc<dyn Mailer>,
    clock: Arc<dyn Clock>,
) -> SharedState {
    Arc::new(AppState {
        resets: ResetService::new(store, mailer, clock, ResetSettings::from_config(config)),
        unknown_email: config.unknown_email,
    })
}

/// SMTP when credentials are configured, otherwise a mailer that only logs.
pub fn mailer_from_config(config: &Config) -> Arc<dyn Mailer> {
    match config.smtp.as_ref() {
        Some(smtp) => match SmtpMailer::new(smtp) {
            Ok(mailer) => {
                tracing::info!("SMTP configured via {}:{}", smtp.host, smtp.port);
                Arc::new(mailer)
            }
            Err(e) => {
                tracing::warn!("SMTP not available, reset links will only be logged: {e}");
                Arc::new(LogMailer)
            }
        },
        None => {
            tracing::warn!("SMTP not configured, reset links will only be logged");
            Arc::new(LogMailer)
        }
    }
}

pub fn build_app(state: SharedState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                // Reset tokens travel in URLs.
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("no-referrer"),
                )),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
