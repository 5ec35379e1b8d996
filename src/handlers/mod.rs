mod devices;
mod issue;
mod validate;

pub use devices::*;
pub use issue::*;
pub use validate::*;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/validate", post(validate_license))
        .route("/activate", post(activate_device))
        .route("/deactivate", post(deactivate_device))
        .route("/devices", get(list_devices))
        .route("/issue", post(issue_license))
        .route("/revoke", post(revoke_license))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
