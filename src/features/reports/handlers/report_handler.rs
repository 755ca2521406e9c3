use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::reports::dtos::{
    ReportFormat, ReportQueryParams, ReportRowDto, ReportSentDto, SendReportDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// Get a route report as JSON rows or a CSV attachment
#[utoipa::path(
    get,
    path = "/api/reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Report rows ordered by point order, or a CSV attachment when format=csv", content(
            (ApiResponse<Vec<ReportRowDto>> = "application/json"),
            (String = "text/csv")
        )),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    AppQuery(params): AppQuery<ReportQueryParams>,
) -> Result<Response> {
    match params.format {
        ReportFormat::Csv => {
            let csv = service.route_report_csv(params.route_id).await?;
            let disposition = format!("attachment; filename=\"report_{}.csv\"", params.route_id);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        ReportFormat::Json => {
            let rows = service.route_report(params.route_id).await?;
            let total = rows.len() as i64;
            Ok(Json(ApiResponse::success(Some(rows), None, Some(Meta { total }))).into_response())
        }
    }
}

/// Send a route report, storing a snapshot of its counters
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SendReportDto,
    responses(
        (status = 200, description = "Report sent", body = ApiResponse<ReportSentDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Route not found")
    ),
    tag = "reports"
)]
pub async fn send_report(
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<SendReportDto>,
) -> Result<Json<ApiResponse<ReportSentDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let sent = service.send_report(dto.route_id).await?;
    Ok(Json(ApiResponse::success(
        Some(sent),
        Some("Report sent".to_string()),
        None,
    )))
}
