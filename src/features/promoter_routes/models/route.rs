use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for a promoter's route on one date.
///
/// `completed_points` and `total_leaflets` are materialized from the route's
/// points and only change through point completion.
#[derive(Debug, Clone, FromRow)]
pub struct Route {
    pub id: i64,
    pub promoter_id: i64,
    pub route_date: NaiveDate,
    pub total_points: i32,
    pub completed_points: i32,
    pub total_leaflets: i32,
    pub created_at: DateTime<Utc>,
}

/// Route joined with its owner's display name
#[derive(Debug, Clone, FromRow)]
pub struct RouteWithPromoter {
    #[sqlx(flatten)]
    pub route: Route,
    pub promoter_name: Option<String>,
}

/// Data for creating a route together with all of its points
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub promoter_id: i64,
    pub route_date: NaiveDate,
    /// Stored in this order; `point_order` is the 1-based index
    pub points: Vec<NewRoutePoint>,
}

#[derive(Debug, Clone)]
pub struct NewRoutePoint {
    pub address: String,
    pub lat: Option<Decimal>,
    pub lng: Option<Decimal>,
    pub completed: bool,
    pub leaflets_distributed: i32,
}

impl NewRoutePoint {
    pub fn pending(address: impl Into<String>, lat: Option<Decimal>, lng: Option<Decimal>) -> Self {
        Self {
            address: address.into(),
            lat,
            lng,
            completed: false,
            leaflets_distributed: 0,
        }
    }
}
