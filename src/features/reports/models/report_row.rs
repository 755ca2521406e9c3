use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One point of a route, flattened with route and promoter columns for export
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub route_id: i64,
    pub route_date: NaiveDate,
    pub promoter_name: String,
    pub promoter_phone: Option<String>,
    pub address: String,
    pub completed: bool,
    pub leaflets_distributed: Option<i32>,
    pub completed_at: Option<DateTime<Utc>>,
    pub photo_url: Option<String>,
}

/// Route counters as stored, with the owner's name.
///
/// Serialized as-is into `daily_reports.report_data`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RouteSummary {
    pub id: i64,
    pub route_date: NaiveDate,
    pub total_points: i32,
    pub completed_points: i32,
    pub total_leaflets: i32,
    pub promoter_name: String,
}
