use std::sync::Arc;

use axum::{http::Method, routing::get, Router};

use crate::core::middleware::cors_layer;
use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature
pub fn routes(service: Arc<ReportService>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::get_report).post(handlers::send_report),
        )
        .with_state(service)
        .layer(cors_layer(
            allowed_origins,
            &[Method::GET, Method::POST, Method::OPTIONS],
        ))
}
