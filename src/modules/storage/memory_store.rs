use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::promoter_routes::models::{
    NewRoute, PointCompletion, PointProgress, Promoter, Route, RoutePoint, RouteWithPromoter,
};
use crate::features::promoter_routes::services::aggregation::aggregate;
use crate::features::reports::models::{DailyReport, NewDailyReport, ReportRow, RouteSummary};
use crate::modules::storage::RouteStore;
use crate::shared::constants::{
    DEFAULT_PROMOTER_ID, DEFAULT_PROMOTER_NAME, DEFAULT_PROMOTER_PHONE,
};

#[derive(Default)]
struct MemoryState {
    promoters: BTreeMap<i64, Promoter>,
    routes: BTreeMap<i64, Route>,
    points: BTreeMap<i64, RoutePoint>,
    daily_reports: Vec<DailyReport>,
    next_route_id: i64,
    next_point_id: i64,
    next_report_id: i64,
}

impl MemoryState {
    fn route_points(&self, route_id: i64) -> Vec<RoutePoint> {
        let mut points: Vec<RoutePoint> = self
            .points
            .values()
            .filter(|p| p.route_id == route_id)
            .cloned()
            .collect();
        points.sort_by_key(|p| p.point_order);
        points
    }
}

/// Process-local [`RouteStore`].
///
/// A single write lock covers each mutation, so multi-step writes are never
/// observed half-applied. Contents are lost on restart.
pub struct MemoryRouteStore {
    state: RwLock<MemoryState>,
}

impl MemoryRouteStore {
    /// Empty store holding only the default promoter
    pub fn new() -> Self {
        let mut state = MemoryState {
            next_route_id: 1,
            next_point_id: 1,
            next_report_id: 1,
            ..Default::default()
        };
        state.promoters.insert(
            DEFAULT_PROMOTER_ID,
            Promoter {
                id: DEFAULT_PROMOTER_ID,
                name: DEFAULT_PROMOTER_NAME.to_string(),
                phone: Some(DEFAULT_PROMOTER_PHONE.to_string()),
            },
        );

        Self {
            state: RwLock::new(state),
        }
    }

    /// Number of sent report snapshots for a route
    #[cfg(test)]
    pub async fn daily_report_count(&self, route_id: i64) -> usize {
        let state = self.state.read().await;
        state
            .daily_reports
            .iter()
            .filter(|r| r.route_id == route_id)
            .count()
    }
}

impl Default for MemoryRouteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouteStore for MemoryRouteStore {
    async fn find_route(
        &self,
        promoter_id: i64,
        route_date: NaiveDate,
    ) -> Result<Option<RouteWithPromoter>> {
        let state = self.state.read().await;
        let found = state
            .routes
            .values()
            .find(|r| r.promoter_id == promoter_id && r.route_date == route_date)
            .map(|route| RouteWithPromoter {
                route: route.clone(),
                promoter_name: state.promoters.get(&promoter_id).map(|p| p.name.clone()),
            });
        Ok(found)
    }

    async fn list_points(&self, route_id: i64) -> Result<Vec<RoutePoint>> {
        Ok(self.state.read().await.route_points(route_id))
    }

    async fn create_route(&self, route: &NewRoute, unique_per_day: bool) -> Result<Route> {
        let mut state = self.state.write().await;

        if !state.promoters.contains_key(&route.promoter_id) {
            return Err(AppError::BadRequest(
                "Referenced promoter does not exist.".to_string(),
            ));
        }
        if unique_per_day {
            if let Some(existing) = state
                .routes
                .values()
                .find(|r| r.promoter_id == route.promoter_id && r.route_date == route.route_date)
            {
                return Err(AppError::Conflict(format!(
                    "Route {} already exists for promoter {} on {}",
                    existing.id, route.promoter_id, route.route_date
                )));
            }
        }

        let now = Utc::now();
        let route_id = state.next_route_id;
        let mut points = Vec::with_capacity(route.points.len());
        for (idx, point) in route.points.iter().enumerate() {
            let point_order = i32::try_from(idx + 1)
                .map_err(|_| AppError::Validation("Too many route points".to_string()))?;
            points.push(RoutePoint {
                id: state.next_point_id + idx as i64,
                route_id,
                address: point.address.clone(),
                lat: point.lat,
                lng: point.lng,
                point_order,
                completed: point.completed,
                leaflets_distributed: Some(point.leaflets_distributed),
                photo_url: None,
                completed_at: point.completed.then_some(now),
                created_at: now,
            });
        }

        let totals = aggregate(points.iter().map(RoutePoint::progress))?;
        let created = Route {
            id: route_id,
            promoter_id: route.promoter_id,
            route_date: route.route_date,
            total_points: totals.total_points,
            completed_points: totals.completed_points,
            total_leaflets: totals.total_leaflets,
            created_at: now,
        };

        state.next_route_id += 1;
        state.next_point_id += points.len() as i64;
        for point in points {
            state.points.insert(point.id, point);
        }
        state.routes.insert(route_id, created.clone());

        Ok(created)
    }

    async fn complete_point(&self, completion: &PointCompletion) -> Result<Option<Route>> {
        let mut state = self.state.write().await;

        let Some(route_id) = state.points.get(&completion.point_id).map(|p| p.route_id) else {
            return Ok(None);
        };

        // Totals are checked before the point is touched
        let totals = aggregate(state.route_points(route_id).iter().map(|p| {
            if p.id == completion.point_id {
                PointProgress {
                    completed: true,
                    leaflets_distributed: Some(completion.leaflets),
                }
            } else {
                p.progress()
            }
        }))?;

        if let Some(point) = state.points.get_mut(&completion.point_id) {
            point.completed = true;
            point.leaflets_distributed = Some(completion.leaflets);
            point.photo_url = completion.photo_url.clone();
            point.completed_at = Some(Utc::now());
        }

        let route = state
            .routes
            .get_mut(&route_id)
            .ok_or_else(|| AppError::Internal(format!("Point without route {}", route_id)))?;
        route.completed_points = totals.completed_points;
        route.total_leaflets = totals.total_leaflets;

        Ok(Some(route.clone()))
    }

    async fn report_rows(&self, route_id: i64) -> Result<Vec<ReportRow>> {
        let state = self.state.read().await;
        let Some(route) = state.routes.get(&route_id) else {
            return Ok(Vec::new());
        };
        let Some(promoter) = state.promoters.get(&route.promoter_id) else {
            return Ok(Vec::new());
        };

        let rows = state
            .route_points(route_id)
            .into_iter()
            .map(|point| ReportRow {
                route_id,
                route_date: route.route_date,
                promoter_name: promoter.name.clone(),
                promoter_phone: promoter.phone.clone(),
                address: point.address,
                completed: point.completed,
                leaflets_distributed: point.leaflets_distributed,
                completed_at: point.completed_at,
                photo_url: point.photo_url,
            })
            .collect();
        Ok(rows)
    }

    async fn route_summary(&self, route_id: i64) -> Result<Option<RouteSummary>> {
        let state = self.state.read().await;
        let summary = state.routes.get(&route_id).and_then(|route| {
            state
                .promoters
                .get(&route.promoter_id)
                .map(|promoter| RouteSummary {
                    id: route.id,
                    route_date: route.route_date,
                    total_points: route.total_points,
                    completed_points: route.completed_points,
                    total_leaflets: route.total_leaflets,
                    promoter_name: promoter.name.clone(),
                })
        });
        Ok(summary)
    }

    async fn insert_daily_report(&self, report: &NewDailyReport) -> Result<DailyReport> {
        let mut state = self.state.write().await;
        if !state.routes.contains_key(&report.route_id) {
            return Err(AppError::NotFound(format!(
                "Route {} not found",
                report.route_id
            )));
        }

        let stored = DailyReport {
            id: state.next_report_id,
            route_id: report.route_id,
            report_date: report.report_date,
            total_points: report.total_points,
            completed_points: report.completed_points,
            total_leaflets: report.total_leaflets,
            report_data: report.report_data.clone(),
            created_at: Utc::now(),
        };
        state.next_report_id += 1;
        state.daily_reports.push(stored.clone());
        Ok(stored)
    }

    async fn ensure_promoter(&self, promoter: &Promoter) -> Result<()> {
        let mut state = self.state.write().await;
        state
            .promoters
            .entry(promoter.id)
            .or_insert_with(|| promoter.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::promoter_routes::models::NewRoutePoint;
    use tokio_test::{assert_err, assert_ok};

    fn new_route(addresses: &[&str]) -> NewRoute {
        NewRoute {
            promoter_id: DEFAULT_PROMOTER_ID,
            route_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            points: addresses
                .iter()
                .map(|a| NewRoutePoint::pending(*a, None, None))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_route_assigns_contiguous_order() {
        let store = MemoryRouteStore::new();
        let route = assert_ok!(store.create_route(&new_route(&["A", "B", "C"]), false).await);

        assert_eq!(route.total_points, 3);
        assert_eq!(route.completed_points, 0);
        let points = store.list_points(route.id).await.unwrap();
        let orders: Vec<i32> = points.iter().map(|p| p.point_order).collect();
        let addresses: Vec<&str> = points.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(addresses, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_unknown_promoter_is_rejected_without_side_effects() {
        let store = MemoryRouteStore::new();
        let mut route = new_route(&["A"]);
        route.promoter_id = 42;

        let err = assert_err!(store.create_route(&route, false).await);
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(store.list_points(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unique_per_day_conflict() {
        let store = MemoryRouteStore::new();
        assert_ok!(store.create_route(&new_route(&["A"]), true).await);

        let err = assert_err!(store.create_route(&new_route(&["B"]), true).await);
        assert!(matches!(err, AppError::Conflict(_)));

        // Without the rule a second route on the same day is accepted
        assert_ok!(store.create_route(&new_route(&["B"]), false).await);
    }

    #[tokio::test]
    async fn test_complete_missing_point_changes_nothing() {
        let store = MemoryRouteStore::new();
        let route = store.create_route(&new_route(&["A"]), false).await.unwrap();

        let result = store
            .complete_point(&PointCompletion {
                point_id: 999,
                leaflets: 10,
                photo_url: None,
            })
            .await
            .unwrap();
        assert!(result.is_none());

        let summary = store.route_summary(route.id).await.unwrap().unwrap();
        assert_eq!(summary.completed_points, 0);
        assert_eq!(summary.total_leaflets, 0);
    }

    #[tokio::test]
    async fn test_report_rows_follow_point_order() {
        let store = MemoryRouteStore::new();
        let route = store
            .create_route(&new_route(&["first", "second"]), false)
            .await
            .unwrap();

        let rows = store.report_rows(route.id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, "first");
        assert_eq!(rows[1].address, "second");
        assert_eq!(rows[0].promoter_name, DEFAULT_PROMOTER_NAME);
        assert!(store.report_rows(route.id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_leaflet_overflow_rejects_completion_without_side_effects() {
        let store = MemoryRouteStore::new();
        let route = store.create_route(&new_route(&["A", "B"]), false).await.unwrap();
        let points = store.list_points(route.id).await.unwrap();

        assert_ok!(
            store
                .complete_point(&PointCompletion {
                    point_id: points[0].id,
                    leaflets: i32::MAX,
                    photo_url: None,
                })
                .await
        );
        let err = assert_err!(
            store
                .complete_point(&PointCompletion {
                    point_id: points[1].id,
                    leaflets: 5,
                    photo_url: None,
                })
                .await
        );
        assert!(matches!(err, AppError::Validation(_)));

        let points = store.list_points(route.id).await.unwrap();
        assert!(!points[1].completed);
        assert_eq!(points[1].leaflets_distributed, Some(0));
        let summary = store.route_summary(route.id).await.unwrap().unwrap();
        assert_eq!(summary.completed_points, 1);
        assert_eq!(summary.total_leaflets, i32::MAX);
    }
}
