pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::profiles::handlers as profile_handlers;
use crate::recommendations::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/quota", get(handlers::handle_quota))
        .route(
            "/api/v1/profiles/:id",
            get(profile_handlers::handle_get_profile),
        )
        .route(
            "/api/v1/reports/:profile_id",
            get(handlers::handle_download_report),
        )
        .with_state(state)
}
