pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/generate-cv", post(handlers::handle_generate_cv))
        .route("/generate-letter", post(handlers::handle_generate_letter))
        .with_state(state)
}

/// Any origin, method and header, with credentials. The request origin is
/// mirrored back since `*` cannot be combined with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}
