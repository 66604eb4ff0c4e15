pub mod password;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/forgot-password", post(password::forgot_password))
        .route("/api/reset-password/{token}", post(password::reset_password))
}
