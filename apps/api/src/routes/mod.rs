pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::cluster::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/cluster",
            post(handlers::handle_cluster),
        )
        .with_state(state)
}
