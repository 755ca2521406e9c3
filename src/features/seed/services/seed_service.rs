use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::error::Result;
use crate::features::promoter_routes::models::{NewRoute, NewRoutePoint, Promoter};
use crate::features::promoter_routes::services::today;
use crate::features::seed::dtos::SeedResultDto;
use crate::modules::storage::RouteStore;
use crate::shared::constants::{
    DEFAULT_PROMOTER_ID, DEFAULT_PROMOTER_NAME, DEFAULT_PROMOTER_PHONE,
};

struct DemoPoint {
    address: &'static str,
    /// Coordinates scaled by 10^4
    lat: i64,
    lng: i64,
    completed: bool,
    leaflets: i32,
}

const DEMO_POINTS: [DemoPoint; 6] = [
    DemoPoint {
        address: "пр. Мира, д. 45, Калининград",
        lat: 547104,
        lng: 205107,
        completed: true,
        leaflets: 0,
    },
    DemoPoint {
        address: "ул. Черняховского, д. 12, Калининград",
        lat: 547158,
        lng: 205128,
        completed: true,
        leaflets: 25,
    },
    DemoPoint {
        address: "пр. Ленинский, д. 78, Калининград",
        lat: 547044,
        lng: 205012,
        completed: false,
        leaflets: 30,
    },
    DemoPoint {
        address: "ул. Горького, д. 23, Калининград",
        lat: 547188,
        lng: 205201,
        completed: false,
        leaflets: 0,
    },
    DemoPoint {
        address: "пр. Победы, д. 56, Калининград",
        lat: 547025,
        lng: 204889,
        completed: false,
        leaflets: 0,
    },
    DemoPoint {
        address: "ул. Багратиона, д. 34, Калининград",
        lat: 547142,
        lng: 205323,
        completed: false,
        leaflets: 0,
    },
];

/// Demo data for the default promoter. Each call adds another route.
pub struct SeedService {
    store: Arc<dyn RouteStore>,
}

impl SeedService {
    pub fn new(store: Arc<dyn RouteStore>) -> Self {
        Self { store }
    }

    /// Create today's demo route with six Kaliningrad stops
    pub async fn seed(&self) -> Result<SeedResultDto> {
        self.store
            .ensure_promoter(&Promoter {
                id: DEFAULT_PROMOTER_ID,
                name: DEFAULT_PROMOTER_NAME.to_string(),
                phone: Some(DEFAULT_PROMOTER_PHONE.to_string()),
            })
            .await?;

        let points: Vec<NewRoutePoint> = DEMO_POINTS
            .iter()
            .map(|p| NewRoutePoint {
                address: p.address.to_string(),
                lat: Some(Decimal::new(p.lat, 4)),
                lng: Some(Decimal::new(p.lng, 4)),
                completed: p.completed,
                leaflets_distributed: p.leaflets,
            })
            .collect();
        let points_created = points.len();

        // Seeding is a demo tool: duplicates per day are always allowed
        let route = self
            .store
            .create_route(
                &NewRoute {
                    promoter_id: DEFAULT_PROMOTER_ID,
                    route_date: today(),
                    points,
                },
                false,
            )
            .await?;

        tracing::info!(
            "Demo route seeded: id={}, points={}",
            route.id,
            points_created
        );

        Ok(SeedResultDto {
            status: "success".to_string(),
            route_id: route.id,
            points_created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::MemoryRouteStore;

    #[tokio::test]
    async fn test_seed_creates_demo_route() {
        let store = Arc::new(MemoryRouteStore::new());
        let service = SeedService::new(store.clone());

        let result = service.seed().await.unwrap();
        assert_eq!(result.status, "success");
        assert_eq!(result.points_created, 6);

        let points = store.list_points(result.route_id).await.unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(points.iter().filter(|p| p.completed).count(), 2);
        assert_eq!(points[0].lat, Some(Decimal::new(547104, 4)));

        let summary = store.route_summary(result.route_id).await.unwrap().unwrap();
        assert_eq!(summary.total_points, 6);
        assert_eq!(summary.completed_points, 2);
        assert_eq!(summary.total_leaflets, 55);
    }

    #[tokio::test]
    async fn test_seed_is_not_idempotent() {
        let store = Arc::new(MemoryRouteStore::new());
        let service = SeedService::new(store);

        let first = service.seed().await.unwrap();
        let second = service.seed().await.unwrap();
        assert_ne!(first.route_id, second.route_id);
    }
}
