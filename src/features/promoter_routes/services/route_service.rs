use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::core::config::RouteConfig;
use crate::core::error::{AppError, Result};
use crate::features::promoter_routes::dtos::{
    CompletePointDto, CreateRouteDto, PointCompletedDto, RouteCreatedDto, RouteDetailDto,
    RoutePointDto,
};
use crate::features::promoter_routes::models::{NewRoute, PointCompletion, RoutePoint};
use crate::features::promoter_routes::services::aggregation::aggregate;
use crate::modules::storage::RouteStore;

/// Service for promoter routes and point completion
pub struct RouteService {
    store: Arc<dyn RouteStore>,
    config: RouteConfig,
}

impl RouteService {
    pub fn new(store: Arc<dyn RouteStore>, config: RouteConfig) -> Self {
        Self { store, config }
    }

    /// Route of a promoter for a date (today if omitted), with its points.
    ///
    /// Counters in the result are computed from the points being returned.
    pub async fn get_route(
        &self,
        promoter_id: i64,
        date: Option<NaiveDate>,
    ) -> Result<Option<RouteDetailDto>> {
        let route_date = date.unwrap_or_else(today);

        let Some(found) = self.store.find_route(promoter_id, route_date).await? else {
            tracing::debug!(
                "No route for promoter {} on {}",
                promoter_id,
                route_date
            );
            return Ok(None);
        };

        let points = self.store.list_points(found.route.id).await?;
        let totals = aggregate(points.iter().map(RoutePoint::progress))?;

        Ok(Some(RouteDetailDto {
            id: found.route.id,
            promoter_id: found.route.promoter_id,
            promoter_name: found.promoter_name,
            route_date: found.route.route_date,
            total_points: totals.total_points,
            completed_points: totals.completed_points,
            total_leaflets: totals.total_leaflets,
            created_at: found.route.created_at,
            points: points.into_iter().map(RoutePointDto::from).collect(),
        }))
    }

    /// Create a route and all of its points atomically
    pub async fn create_route(&self, dto: CreateRouteDto) -> Result<RouteCreatedDto> {
        let points = dto
            .points
            .into_iter()
            .map(|p| p.into_new_point())
            .collect::<Result<Vec<_>>>()?;

        let new_route = NewRoute {
            promoter_id: dto.promoter_id,
            route_date: dto.route_date.unwrap_or_else(today),
            points,
        };

        let route = self
            .store
            .create_route(&new_route, self.config.unique_per_day)
            .await?;

        tracing::info!(
            "Route created: id={}, promoter={}, date={}, points={}",
            route.id,
            route.promoter_id,
            route.route_date,
            route.total_points
        );

        Ok(route.into())
    }

    /// Mark a point complete and refresh its route's counters
    pub async fn complete_point(&self, dto: CompletePointDto) -> Result<PointCompletedDto> {
        let completion = PointCompletion {
            point_id: dto.point_id,
            leaflets: dto.leaflets,
            photo_url: dto.photo_url,
        };

        let route = self
            .store
            .complete_point(&completion)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Route point {} not found", completion.point_id))
            })?;

        tracing::info!(
            "Point {} completed: route={}, completed_points={}, total_leaflets={}",
            completion.point_id,
            route.id,
            route.completed_points,
            route.total_leaflets
        );

        Ok(PointCompletedDto {
            point_id: completion.point_id,
            status: "completed".to_string(),
            route_id: route.id,
            completed_points: route.completed_points,
            total_leaflets: route.total_leaflets,
        })
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::promoter_routes::dtos::RoutePointInputDto;
    use crate::modules::storage::MemoryRouteStore;
    use fake::faker::address::en::StreetName;
    use fake::Fake;

    fn service() -> RouteService {
        RouteService::new(Arc::new(MemoryRouteStore::new()), RouteConfig::default())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn create_dto(addresses: &[&str]) -> CreateRouteDto {
        CreateRouteDto {
            promoter_id: 1,
            route_date: Some(date()),
            points: addresses
                .iter()
                .map(|a| RoutePointInputDto {
                    address: a.to_string(),
                    lat: None,
                    lng: None,
                })
                .collect(),
        }
    }

    fn complete_dto(point_id: i64, leaflets: i32) -> CompletePointDto {
        CompletePointDto {
            point_id,
            leaflets,
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let service = service();
        let created = service.create_route(create_dto(&["A", "B"])).await.unwrap();
        assert_eq!(created.status, "created");

        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        assert_eq!(route.id, created.route_id);
        assert_eq!(route.points.len(), 2);
        assert_eq!(
            route.points.iter().map(|p| p.point_order).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(route.completed_points, 0);
        assert_eq!(route.total_points, 2);
    }

    #[tokio::test]
    async fn test_complete_point_updates_counters() {
        let service = service();
        let created = service.create_route(create_dto(&["A", "B"])).await.unwrap();
        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        let point_b = route.points[1].id;

        let result = service.complete_point(complete_dto(point_b, 30)).await.unwrap();
        assert_eq!(result.route_id, created.route_id);
        assert_eq!(result.completed_points, 1);
        assert_eq!(result.total_leaflets, 30);

        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        assert_eq!(route.completed_points, 1);
        assert_eq!(route.total_leaflets, 30);
        assert!(!route.points[0].completed);
        assert!(route.points[1].completed);
        assert!(route.points[1].completed_at.is_some());
    }

    #[tokio::test]
    async fn test_completing_twice_keeps_aggregates() {
        let service = service();
        service.create_route(create_dto(&["A", "B"])).await.unwrap();
        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        let point_a = route.points[0].id;

        let first = service.complete_point(complete_dto(point_a, 12)).await.unwrap();
        let second = service.complete_point(complete_dto(point_a, 12)).await.unwrap();
        assert_eq!(first.completed_points, second.completed_points);
        assert_eq!(first.total_leaflets, second.total_leaflets);
    }

    #[tokio::test]
    async fn test_complete_missing_point_is_not_found() {
        let service = service();
        service.create_route(create_dto(&["A"])).await.unwrap();

        let err = service
            .complete_point(complete_dto(404, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        assert_eq!(route.completed_points, 0);
        assert_eq!(route.total_leaflets, 0);
    }

    #[tokio::test]
    async fn test_empty_route_and_missing_route() {
        let service = service();
        assert!(service.get_route(1, Some(date())).await.unwrap().is_none());

        service.create_route(create_dto(&[])).await.unwrap();
        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        assert!(route.points.is_empty());
        assert_eq!(route.total_points, 0);
    }

    #[tokio::test]
    async fn test_order_matches_input_for_many_points() {
        let service = service();
        let addresses: Vec<String> = (0..12).map(|_| StreetName().fake::<String>()).collect();
        let refs: Vec<&str> = addresses.iter().map(String::as_str).collect();
        service.create_route(create_dto(&refs)).await.unwrap();

        let route = service.get_route(1, Some(date())).await.unwrap().unwrap();
        assert_eq!(route.total_points, 12);
        for (idx, point) in route.points.iter().enumerate() {
            assert_eq!(point.point_order, idx as i32 + 1);
            assert_eq!(point.address, addresses[idx]);
        }
    }

    #[tokio::test]
    async fn test_route_date_defaults_to_today() {
        let service = service();
        let mut dto = create_dto(&["A"]);
        dto.route_date = None;
        service.create_route(dto).await.unwrap();

        assert!(service.get_route(1, None).await.unwrap().is_some());
    }
}
