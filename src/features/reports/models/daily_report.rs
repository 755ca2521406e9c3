use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Immutable snapshot written each time a route report is sent
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct DailyReport {
    pub id: i64,
    pub route_id: i64,
    pub report_date: NaiveDate,
    pub total_points: i32,
    pub completed_points: i32,
    pub total_leaflets: i32,
    pub report_data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDailyReport {
    pub route_id: i64,
    pub report_date: NaiveDate,
    pub total_points: i32,
    pub completed_points: i32,
    pub total_leaflets: i32,
    pub report_data: serde_json::Value,
}
