use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for one stop on a route
#[derive(Debug, Clone, FromRow)]
pub struct RoutePoint {
    pub id: i64,
    pub route_id: i64,
    pub address: String,
    pub lat: Option<Decimal>,
    pub lng: Option<Decimal>,
    pub point_order: i32,
    pub completed: bool,
    pub leaflets_distributed: Option<i32>,
    pub photo_url: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The two point columns route counters are derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct PointProgress {
    pub completed: bool,
    pub leaflets_distributed: Option<i32>,
}

impl RoutePoint {
    pub fn progress(&self) -> PointProgress {
        PointProgress {
            completed: self.completed,
            leaflets_distributed: self.leaflets_distributed,
        }
    }
}

/// Completion event for a single point
#[derive(Debug, Clone)]
pub struct PointCompletion {
    pub point_id: i64,
    pub leaflets: i32,
    pub photo_url: Option<String>,
}
