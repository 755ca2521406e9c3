use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::promoter_routes::dtos::{
    CompletePointBodyDto, PointCompletedDto, RouteActionDto, RouteActionResultDto,
    RouteDetailDto, RouteQueryParams,
};
use crate::features::promoter_routes::services::RouteService;
use crate::shared::types::ApiResponse;

/// Get a promoter's route for a date
///
/// Returns `data: null` when the promoter has no route on that date.
#[utoipa::path(
    get,
    path = "/api/routes",
    params(RouteQueryParams),
    responses(
        (status = 200, description = "Route with ordered points, or null", body = ApiResponse<RouteDetailDto>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "routes"
)]
pub async fn get_route(
    State(service): State<Arc<RouteService>>,
    AppQuery(params): AppQuery<RouteQueryParams>,
) -> Result<Json<ApiResponse<RouteDetailDto>>> {
    let route = service.get_route(params.promoter_id, params.date).await?;
    let message = route
        .is_none()
        .then(|| "No route for this promoter and date".to_string());
    Ok(Json(ApiResponse::success(route, message, None)))
}

/// Create a route or complete a point
///
/// The body's `action` field selects the operation: `create_route` or
/// `complete_point`.
#[utoipa::path(
    post,
    path = "/api/routes",
    request_body = RouteActionDto,
    responses(
        (status = 200, description = "Action applied", body = ApiResponse<RouteActionResultDto>),
        (status = 400, description = "Validation error or unknown action"),
        (status = 404, description = "Route point not found"),
        (status = 409, description = "Route already exists for promoter and date")
    ),
    tag = "routes"
)]
pub async fn route_action(
    State(service): State<Arc<RouteService>>,
    AppJson(action): AppJson<RouteActionDto>,
) -> Result<Json<ApiResponse<RouteActionResultDto>>> {
    let result = match action {
        RouteActionDto::CreateRoute(dto) => {
            dto.validate()
                .map_err(|e| AppError::Validation(e.to_string()))?;
            RouteActionResultDto::Created(service.create_route(dto).await?)
        }
        RouteActionDto::CompletePoint(dto) => {
            dto.validate()
                .map_err(|e| AppError::Validation(e.to_string()))?;
            RouteActionResultDto::Completed(service.complete_point(dto).await?)
        }
    };

    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

/// Mark a route point complete
#[utoipa::path(
    put,
    path = "/api/routes/points/{id}",
    params(
        ("id" = i64, Path, description = "Route point ID")
    ),
    request_body = CompletePointBodyDto,
    responses(
        (status = 200, description = "Point completed", body = ApiResponse<PointCompletedDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Route point not found")
    ),
    tag = "routes"
)]
pub async fn complete_point(
    State(service): State<Arc<RouteService>>,
    Path(id): Path<i64>,
    AppJson(body): AppJson<CompletePointBodyDto>,
) -> Result<Json<ApiResponse<PointCompletedDto>>> {
    let dto = body.for_point(id);
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let completed = service.complete_point(dto).await?;
    Ok(Json(ApiResponse::success(Some(completed), None, None)))
}
