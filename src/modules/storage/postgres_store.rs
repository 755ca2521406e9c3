use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::promoter_routes::models::{
    NewRoute, PointCompletion, PointProgress, Promoter, Route, RoutePoint, RouteWithPromoter,
};
use crate::features::promoter_routes::services::aggregation::aggregate;
use crate::features::reports::models::{DailyReport, NewDailyReport, ReportRow, RouteSummary};
use crate::modules::storage::RouteStore;

const ROUTE_COLUMNS: &str =
    "id, promoter_id, route_date, total_points, completed_points, total_leaflets, created_at";

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Foreign key violation (PostgreSQL error code 23503)
        if db_err.code().as_deref() == Some("23503") {
            return AppError::BadRequest("Referenced promoter does not exist.".to_string());
        }
    }

    AppError::Database(e)
}

/// [`RouteStore`] backed by PostgreSQL.
///
/// Writes run in a single transaction; dropping it on an early return rolls
/// it back.
pub struct PgRouteStore {
    pool: PgPool,
}

impl PgRouteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RouteStore for PgRouteStore {
    async fn find_route(
        &self,
        promoter_id: i64,
        route_date: NaiveDate,
    ) -> Result<Option<RouteWithPromoter>> {
        sqlx::query_as::<_, RouteWithPromoter>(
            r#"
            SELECT
                r.id, r.promoter_id, r.route_date, r.total_points,
                r.completed_points, r.total_leaflets, r.created_at,
                p.name AS promoter_name
            FROM routes r
            LEFT JOIN promoters p ON p.id = r.promoter_id
            WHERE r.promoter_id = $1 AND r.route_date = $2
            ORDER BY r.created_at, r.id
            LIMIT 1
            "#,
        )
        .bind(promoter_id)
        .bind(route_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find route: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_points(&self, route_id: i64) -> Result<Vec<RoutePoint>> {
        sqlx::query_as::<_, RoutePoint>(
            r#"
            SELECT id, route_id, address, lat, lng, point_order, completed,
                   leaflets_distributed, photo_url, completed_at, created_at
            FROM route_points
            WHERE route_id = $1
            ORDER BY point_order
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list route points: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn create_route(&self, route: &NewRoute, unique_per_day: bool) -> Result<Route> {
        let mut tx = self.pool.begin().await?;

        if unique_per_day {
            // Serializes route creation per promoter so the duplicate check holds
            let promoter: Option<i64> =
                sqlx::query_scalar("SELECT id FROM promoters WHERE id = $1 FOR UPDATE")
                    .bind(route.promoter_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if promoter.is_none() {
                return Err(AppError::BadRequest(
                    "Referenced promoter does not exist.".to_string(),
                ));
            }

            let existing: Option<i64> = sqlx::query_scalar(
                "SELECT id FROM routes WHERE promoter_id = $1 AND route_date = $2 LIMIT 1",
            )
            .bind(route.promoter_id)
            .bind(route.route_date)
            .fetch_optional(&mut *tx)
            .await?;
            if let Some(existing_id) = existing {
                return Err(AppError::Conflict(format!(
                    "Route {} already exists for promoter {} on {}",
                    existing_id, route.promoter_id, route.route_date
                )));
            }
        }

        let totals = aggregate(route.points.iter().map(|p| PointProgress {
            completed: p.completed,
            leaflets_distributed: Some(p.leaflets_distributed),
        }))?;

        let insert_route = format!(
            r#"
            INSERT INTO routes (promoter_id, route_date, total_points, completed_points, total_leaflets)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ROUTE_COLUMNS
        );
        let created = sqlx::query_as::<_, Route>(&insert_route)
            .bind(route.promoter_id)
            .bind(route.route_date)
            .bind(totals.total_points)
            .bind(totals.completed_points)
            .bind(totals.total_leaflets)
            .fetch_one(&mut *tx)
            .await
            .map_err(handle_db_error)?;

        for (idx, point) in route.points.iter().enumerate() {
            let point_order = i32::try_from(idx + 1)
                .map_err(|_| AppError::Validation("Too many route points".to_string()))?;

            sqlx::query(
                r#"
                INSERT INTO route_points
                    (route_id, address, lat, lng, point_order, completed,
                     leaflets_distributed, completed_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, CASE WHEN $6 THEN NOW() ELSE NULL END)
                "#,
            )
            .bind(created.id)
            .bind(&point.address)
            .bind(point.lat)
            .bind(point.lng)
            .bind(point_order)
            .bind(point.completed)
            .bind(point.leaflets_distributed)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert route point {}: {:?}", point_order, e);
                handle_db_error(e)
            })?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn complete_point(&self, completion: &PointCompletion) -> Result<Option<Route>> {
        let mut tx = self.pool.begin().await?;

        let route_id: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE route_points
            SET completed = TRUE,
                leaflets_distributed = $1,
                photo_url = $2,
                completed_at = NOW()
            WHERE id = $3
            RETURNING route_id
            "#,
        )
        .bind(completion.leaflets)
        .bind(&completion.photo_url)
        .bind(completion.point_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(route_id) = route_id else {
            return Ok(None);
        };

        // Concurrent completions on the same route queue here; the point
        // read below then sees every committed completion.
        sqlx::query("SELECT id FROM routes WHERE id = $1 FOR UPDATE")
            .bind(route_id)
            .execute(&mut *tx)
            .await?;

        let progress = sqlx::query_as::<_, PointProgress>(
            "SELECT completed, leaflets_distributed FROM route_points WHERE route_id = $1",
        )
        .bind(route_id)
        .fetch_all(&mut *tx)
        .await?;
        let totals = aggregate(progress)?;

        let update_route = format!(
            r#"
            UPDATE routes
            SET completed_points = $1, total_leaflets = $2
            WHERE id = $3
            RETURNING {}
            "#,
            ROUTE_COLUMNS
        );
        let route = sqlx::query_as::<_, Route>(&update_route)
            .bind(totals.completed_points)
            .bind(totals.total_leaflets)
            .bind(route_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(route))
    }

    async fn report_rows(&self, route_id: i64) -> Result<Vec<ReportRow>> {
        sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT
                r.id AS route_id,
                r.route_date,
                p.name AS promoter_name,
                p.phone AS promoter_phone,
                rp.address,
                rp.completed,
                rp.leaflets_distributed,
                rp.completed_at,
                rp.photo_url
            FROM routes r
            JOIN promoters p ON r.promoter_id = p.id
            JOIN route_points rp ON r.id = rp.route_id
            WHERE r.id = $1
            ORDER BY rp.point_order
            "#,
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load report rows: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn route_summary(&self, route_id: i64) -> Result<Option<RouteSummary>> {
        sqlx::query_as::<_, RouteSummary>(
            r#"
            SELECT
                r.id, r.route_date, r.total_points, r.completed_points,
                r.total_leaflets, p.name AS promoter_name
            FROM routes r
            JOIN promoters p ON r.promoter_id = p.id
            WHERE r.id = $1
            "#,
        )
        .bind(route_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn insert_daily_report(&self, report: &NewDailyReport) -> Result<DailyReport> {
        sqlx::query_as::<_, DailyReport>(
            r#"
            INSERT INTO daily_reports
                (route_id, report_date, total_points, completed_points, total_leaflets, report_data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, route_id, report_date, total_points, completed_points,
                      total_leaflets, report_data, created_at
            "#,
        )
        .bind(report.route_id)
        .bind(report.report_date)
        .bind(report.total_points)
        .bind(report.completed_points)
        .bind(report.total_leaflets)
        .bind(&report.report_data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert daily report: {:?}", e);
            handle_db_error(e)
        })
    }

    async fn ensure_promoter(&self, promoter: &Promoter) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO promoters (id, name, phone)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(promoter.id)
        .bind(&promoter.name)
        .bind(&promoter.phone)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
