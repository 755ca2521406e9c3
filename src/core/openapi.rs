use utoipa::{Modify, OpenApi};

use crate::features::promoter_routes::{dtos as routes_dtos, handlers as routes_handlers};
use crate::features::reports::{dtos as reports_dtos, handlers as reports_handlers};
use crate::features::seed::{dtos as seed_dtos, handlers as seed_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Routes
        routes_handlers::get_route,
        routes_handlers::route_action,
        routes_handlers::complete_point,
        // Reports
        reports_handlers::get_report,
        reports_handlers::send_report,
        // Seed
        seed_handlers::init_data,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Routes
            routes_dtos::RouteActionDto,
            routes_dtos::CreateRouteDto,
            routes_dtos::RoutePointInputDto,
            routes_dtos::CompletePointDto,
            routes_dtos::CompletePointBodyDto,
            routes_dtos::RoutePointDto,
            routes_dtos::RouteDetailDto,
            routes_dtos::RouteCreatedDto,
            routes_dtos::PointCompletedDto,
            routes_dtos::RouteActionResultDto,
            ApiResponse<routes_dtos::RouteDetailDto>,
            ApiResponse<routes_dtos::RouteActionResultDto>,
            ApiResponse<routes_dtos::PointCompletedDto>,
            // Reports
            reports_dtos::ReportFormat,
            reports_dtos::ReportRowDto,
            reports_dtos::SendReportDto,
            reports_dtos::ReportSummaryDto,
            reports_dtos::ReportSentDto,
            ApiResponse<Vec<reports_dtos::ReportRowDto>>,
            ApiResponse<reports_dtos::ReportSentDto>,
            // Seed
            seed_dtos::SeedResultDto,
            ApiResponse<seed_dtos::SeedResultDto>,
        )
    ),
    tags(
        (name = "routes", description = "Promoter routes and point completion"),
        (name = "reports", description = "Route reports and sent-report snapshots"),
        (name = "seed", description = "Demo data"),
    ),
    info(
        title = "Promoter Routes API",
        version = "0.1.0",
        description = "Route tracking API for promoters",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_endpoints() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/routes"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/routes/points/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/reports"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/init-data"));
    }
}
