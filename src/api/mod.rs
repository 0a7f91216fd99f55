mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::manager::Manager;

/// Shared router state. The manager holds no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<Manager>,
}

pub fn create_router(manager: Manager, config: &ServerConfig) -> Router {
    let state = AppState {
        manager: Arc::new(manager),
    };

    Router::new()
        .route("/health", get(handlers::health))
        .route("/schema/campaign", get(handlers::campaign_schema))
        .route(
            "/start_campaign",
            post(handlers::start_campaign).layer(DefaultBodyLimit::max(config.max_body_bytes)),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
