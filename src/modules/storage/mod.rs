//! Storage module for route tracking data
//!
//! Defines the [`RouteStore`] contract used by the route, report and seed
//! services, with a PostgreSQL implementation and an in-memory one.
//!
//! Every method is a unit of work: multi-statement writes either commit
//! together or leave no trace.

mod memory_store;
mod postgres_store;

pub use memory_store::MemoryRouteStore;
pub use postgres_store::PgRouteStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::error::Result;
use crate::features::promoter_routes::models::{
    NewRoute, PointCompletion, Promoter, Route, RoutePoint, RouteWithPromoter,
};
use crate::features::reports::models::{DailyReport, NewDailyReport, ReportRow, RouteSummary};

#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Earliest-created route for the promoter on the date, if any
    async fn find_route(
        &self,
        promoter_id: i64,
        route_date: NaiveDate,
    ) -> Result<Option<RouteWithPromoter>>;

    /// Points of a route ordered by `point_order`
    async fn list_points(&self, route_id: i64) -> Result<Vec<RoutePoint>>;

    /// Insert a route and all its points atomically.
    ///
    /// Stored counters are derived from the given points. With
    /// `unique_per_day`, an existing route for the same promoter and date is
    /// rejected with a conflict.
    async fn create_route(&self, route: &NewRoute, unique_per_day: bool) -> Result<Route>;

    /// Mark a point complete and recompute its route's counters in one unit.
    ///
    /// Returns `None` without changing anything when the point does not exist.
    async fn complete_point(&self, completion: &PointCompletion) -> Result<Option<Route>>;

    /// Export rows for every point on the route, ordered by `point_order`
    async fn report_rows(&self, route_id: i64) -> Result<Vec<ReportRow>>;

    async fn route_summary(&self, route_id: i64) -> Result<Option<RouteSummary>>;

    async fn insert_daily_report(&self, report: &NewDailyReport) -> Result<DailyReport>;

    /// Insert the promoter unless a row with its id already exists
    async fn ensure_promoter(&self, promoter: &Promoter) -> Result<()>;
}
