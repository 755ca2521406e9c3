use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::ReportRow;

/// Output format of a route report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

/// Query parameters for reading a route report
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQueryParams {
    /// Route ID
    pub route_id: i64,

    /// `json` (default) or `csv`
    #[serde(default)]
    pub format: ReportFormat,
}

/// One point of a route report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportRowDto {
    pub route_id: i64,
    pub route_date: NaiveDate,
    pub promoter_name: String,
    pub promoter_phone: Option<String>,
    pub address: String,
    pub completed: bool,
    pub leaflets_distributed: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub photo_url: Option<String>,
}

impl From<ReportRow> for ReportRowDto {
    fn from(r: ReportRow) -> Self {
        Self {
            route_id: r.route_id,
            route_date: r.route_date,
            promoter_name: r.promoter_name,
            promoter_phone: r.promoter_phone,
            address: r.address,
            completed: r.completed,
            leaflets_distributed: r.leaflets_distributed.unwrap_or(0),
            completed_at: r.completed_at,
            photo_url: r.photo_url,
        }
    }
}

/// Request DTO for sending a route report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendReportDto {
    #[validate(range(min = 1, message = "route_id must be positive"))]
    pub route_id: i64,
}

/// Human-readable digest of a sent report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSummaryDto {
    pub promoter: String,
    pub date: NaiveDate,
    pub completed: i32,
    pub total: i32,
    pub leaflets: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReportSentDto {
    pub report_id: i64,
    pub status: String,
    pub summary: ReportSummaryDto,
}
