use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeedResultDto {
    pub status: String,
    pub route_id: i64,
    pub points_created: usize,
}
