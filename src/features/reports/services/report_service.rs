use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ReportRowDto, ReportSentDto, ReportSummaryDto};
use crate::features::reports::models::{NewDailyReport, ReportRow};
use crate::features::reports::services::csv_export;
use crate::modules::storage::RouteStore;

/// Service for route reports and sent-report snapshots
pub struct ReportService {
    store: Arc<dyn RouteStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self { store }
    }

    async fn rows(&self, route_id: i64) -> Result<Vec<ReportRow>> {
        self.store.report_rows(route_id).await
    }

    /// Report rows for every point of the route, in visiting order
    pub async fn route_report(&self, route_id: i64) -> Result<Vec<ReportRowDto>> {
        let rows = self.rows(route_id).await?;
        Ok(rows.into_iter().map(ReportRowDto::from).collect())
    }

    /// Same rows as [`Self::route_report`], rendered as CSV
    pub async fn route_report_csv(&self, route_id: i64) -> Result<String> {
        let rows = self.rows(route_id).await?;
        Ok(csv_export::render(&rows))
    }

    /// Record a snapshot of the route's current counters
    pub async fn send_report(&self, route_id: i64) -> Result<ReportSentDto> {
        let summary = self
            .store
            .route_summary(route_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;

        let report = self
            .store
            .insert_daily_report(&NewDailyReport {
                route_id,
                report_date: summary.route_date,
                total_points: summary.total_points,
                completed_points: summary.completed_points,
                total_leaflets: summary.total_leaflets,
                report_data: serde_json::to_value(&summary)?,
            })
            .await?;

        tracing::info!(
            "Report sent: id={}, route={}, completed={}/{}, leaflets={}",
            report.id,
            route_id,
            report.completed_points,
            report.total_points,
            report.total_leaflets
        );

        Ok(ReportSentDto {
            report_id: report.id,
            status: "sent".to_string(),
            summary: ReportSummaryDto {
                promoter: summary.promoter_name,
                date: summary.route_date,
                completed: summary.completed_points,
                total: summary.total_points,
                leaflets: summary.total_leaflets,
            },
        })
    }
}
