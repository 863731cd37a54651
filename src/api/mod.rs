pub mod error;
pub mod home;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, context::AppState};

pub fn router(state: AppState, cfg: &Config) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(TimeoutLayer::new(Duration::from_secs(
                cfg.server.request_timeout_secs,
            ))),
        )
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe; serving implies the model finished training.
pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
