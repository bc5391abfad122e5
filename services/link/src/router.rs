use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use craftlink_core::health::{healthz, readyz};
use craftlink_core::middleware::request_id_layer;

use crate::handlers::link_code::{
    generate_code, get_active_code, pending_code, unlink_account, validate_code,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Link codes — web session
        .route("/api/linkcode/generate", post(generate_code))
        .route("/api/linkcode", get(get_active_code))
        .route("/api/linkcode", delete(unlink_account))
        // Link codes — Minecraft plugin (unauthenticated)
        .route("/api/linkcode/validate", post(validate_code))
        .route("/api/linkcode/pending", post(pending_code))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
