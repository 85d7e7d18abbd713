pub mod api_state;
pub mod cli;
pub mod controllers;
pub mod error;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    api_state::ExpirationApiState,
    controllers::{
        expirations::{delete_expiration, get_expirations, post_expiration},
        general::get_healthcheck,
    },
};

pub const DEFAULT_PORT: u16 = 5500;

pub fn app(state: ExpirationApiState) -> Router {
    Router::new()
        // General
        .route("/healthcheck", get(get_healthcheck))
        // Expirations
        .route("/expirations", get(get_expirations))
        .route(
            "/expirations/{key_id}",
            post(post_expiration).delete(delete_expiration),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
