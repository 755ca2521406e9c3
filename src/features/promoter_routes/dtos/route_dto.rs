use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::promoter_routes::models::{NewRoutePoint, Route, RoutePoint};
use crate::shared::constants::default_promoter_id;

/// Query parameters for fetching a promoter's route
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RouteQueryParams {
    /// Promoter ID (default: 1)
    #[serde(default = "default_promoter_id")]
    pub promoter_id: i64,

    /// Route date, `YYYY-MM-DD` (default: today)
    pub date: Option<NaiveDate>,
}

/// Body of `POST /api/routes`, dispatched on the `action` field
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouteActionDto {
    CreateRoute(CreateRouteDto),
    CompletePoint(CompletePointDto),
}

/// Request DTO for creating a route with its points
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRouteDto {
    #[serde(default = "default_promoter_id")]
    #[validate(range(min = 1, message = "promoter_id must be positive"))]
    pub promoter_id: i64,

    /// Defaults to today
    pub route_date: Option<NaiveDate>,

    /// Visiting order; may be empty
    #[serde(default)]
    #[validate(nested)]
    pub points: Vec<RoutePointInputDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RoutePointInputDto {
    #[validate(length(min = 1, max = 500, message = "Address must be 1-500 characters"))]
    pub address: String,

    #[validate(range(min = -90.0, max = 90.0, message = "lat must be within [-90, 90]"))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "lng must be within [-180, 180]"))]
    pub lng: Option<f64>,
}

/// Request DTO for marking a point complete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompletePointDto {
    #[validate(range(min = 1, message = "point_id must be positive"))]
    pub point_id: i64,

    #[serde(default)]
    #[validate(range(min = 0, max = 100000, message = "leaflets must be between 0 and 100000"))]
    pub leaflets: i32,

    #[validate(length(max = 2048, message = "photo_url must not exceed 2048 characters"))]
    pub photo_url: Option<String>,
}

/// Body of `PUT /api/routes/points/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompletePointBodyDto {
    #[serde(default)]
    #[validate(range(min = 0, max = 100000, message = "leaflets must be between 0 and 100000"))]
    pub leaflets: i32,
    pub photo_url: Option<String>,
}

impl CompletePointBodyDto {
    pub fn for_point(self, point_id: i64) -> CompletePointDto {
        CompletePointDto {
            point_id,
            leaflets: self.leaflets,
            photo_url: self.photo_url,
        }
    }
}

/// Response DTO for a route point
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoutePointDto {
    pub id: i64,
    pub route_id: i64,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub point_order: i32,
    pub completed: bool,
    pub leaflets_distributed: i32,
    pub photo_url: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<RoutePoint> for RoutePointDto {
    fn from(p: RoutePoint) -> Self {
        Self {
            id: p.id,
            route_id: p.route_id,
            address: p.address,
            lat: p.lat.and_then(|v| v.to_f64()),
            lng: p.lng.and_then(|v| v.to_f64()),
            point_order: p.point_order,
            completed: p.completed,
            leaflets_distributed: p.leaflets_distributed.unwrap_or(0),
            photo_url: p.photo_url,
            completed_at: p.completed_at,
            created_at: p.created_at,
        }
    }
}

/// Response DTO for a route with live point counters and its ordered points
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RouteDetailDto {
    pub id: i64,
    pub promoter_id: i64,
    pub promoter_name: Option<String>,
    pub route_date: NaiveDate,
    pub total_points: i32,
    pub completed_points: i32,
    pub total_leaflets: i32,
    pub created_at: DateTime<Utc>,
    pub points: Vec<RoutePointDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RouteCreatedDto {
    pub route_id: i64,
    pub status: String,
    pub total_points: i32,
}

impl From<Route> for RouteCreatedDto {
    fn from(r: Route) -> Self {
        Self {
            route_id: r.id,
            status: "created".to_string(),
            total_points: r.total_points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PointCompletedDto {
    pub point_id: i64,
    pub status: String,
    pub route_id: i64,
    pub completed_points: i32,
    pub total_leaflets: i32,
}

/// Result of a `POST /api/routes` action
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RouteActionResultDto {
    Created(RouteCreatedDto),
    Completed(PointCompletedDto),
}

/// Store a client coordinate with the column's 7 decimal places
pub fn coordinate(value: Option<f64>) -> Result<Option<Decimal>> {
    value
        .map(|v| {
            Decimal::try_from(v)
                .map(|d| d.round_dp(7))
                .map_err(|_| AppError::Validation(format!("Invalid coordinate: {}", v)))
        })
        .transpose()
}

impl RoutePointInputDto {
    pub fn into_new_point(self) -> Result<NewRoutePoint> {
        Ok(NewRoutePoint::pending(
            self.address,
            coordinate(self.lat)?,
            coordinate(self.lng)?,
        ))
    }
}
