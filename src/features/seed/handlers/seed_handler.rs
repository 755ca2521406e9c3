use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::seed::dtos::SeedResultDto;
use crate::features::seed::services::SeedService;
use crate::shared::types::ApiResponse;

/// Populate today's demo route for the default promoter
///
/// Not idempotent: every call creates another route.
#[utoipa::path(
    post,
    path = "/api/init-data",
    responses(
        (status = 200, description = "Demo data created", body = ApiResponse<SeedResultDto>),
        (status = 405, description = "Only POST allowed")
    ),
    tag = "seed"
)]
pub async fn init_data(
    State(service): State<Arc<SeedService>>,
) -> Result<Json<ApiResponse<SeedResultDto>>> {
    let result = service.seed().await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
