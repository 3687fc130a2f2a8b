use crate::cluster::engine::ClusterEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub engine: ClusterEngine,
}
