use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, put},
    Router,
};

use crate::core::middleware::cors_layer;
use crate::features::promoter_routes::handlers;
use crate::features::promoter_routes::services::RouteService;

/// Create routes for the promoter routes feature
pub fn routes(service: Arc<RouteService>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route(
            "/api/routes",
            get(handlers::get_route).post(handlers::route_action),
        )
        .route("/api/routes/points/{id}", put(handlers::complete_point))
        .with_state(service)
        .layer(cors_layer(
            allowed_origins,
            &[Method::GET, Method::POST, Method::PUT, Method::OPTIONS],
        ))
}
