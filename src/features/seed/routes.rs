use std::sync::Arc;

use axum::{http::Method, routing::post, Router};

use crate::core::middleware::cors_layer;
use crate::features::seed::handlers;
use crate::features::seed::services::SeedService;

/// Create routes for the seed feature (POST only)
pub fn routes(service: Arc<SeedService>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/init-data", post(handlers::init_data))
        .with_state(service)
        .layer(cors_layer(allowed_origins, &[Method::POST, Method::OPTIONS]))
}
