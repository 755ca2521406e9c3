use std::sync::Arc;

use axum::{routing::get, Router};

use crate::core::config::RouteConfig;
use crate::features::promoter_routes::{routes as promoter_routes, RouteService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::seed::{routes as seed_routes, SeedService};
use crate::modules::storage::RouteStore;

/// Services shared by all request handlers
#[derive(Clone)]
pub struct AppServices {
    pub route_service: Arc<RouteService>,
    pub report_service: Arc<ReportService>,
    pub seed_service: Arc<SeedService>,
}

impl AppServices {
    pub fn new(store: Arc<dyn RouteStore>, route_config: RouteConfig) -> Self {
        Self {
            route_service: Arc::new(RouteService::new(Arc::clone(&store), route_config)),
            report_service: Arc::new(ReportService::new(Arc::clone(&store))),
            seed_service: Arc::new(SeedService::new(store)),
        }
    }
}

/// Simple health check endpoint
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// API routes with per-endpoint CORS policies
pub fn build_router(services: AppServices, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(promoter_routes::routes(
            services.route_service,
            allowed_origins,
        ))
        .merge(reports_routes::routes(
            services.report_service,
            allowed_origins,
        ))
        .merge(seed_routes::routes(services.seed_service, allowed_origins))
        .route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
    use serde_json::{json, Value};

    use crate::core::config::RouteConfig;
    use crate::shared::test_helpers::{test_server, test_server_with};

    fn origin() -> (HeaderName, HeaderValue) {
        (header::ORIGIN, HeaderValue::from_static("https://promo.example"))
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_create_then_fetch_route() {
        let server = test_server();

        let created = server
            .post("/api/routes")
            .json(&json!({
                "action": "create_route",
                "route_date": "2024-03-01",
                "points": [
                    {"address": "ул. Ленина, д. 1", "lat": 54.7104, "lng": 20.4522},
                    {"address": "ул. Ленина, д. 2"}
                ]
            }))
            .await;
        created.assert_status_ok();
        let body: Value = created.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "created");
        assert_eq!(body["data"]["total_points"], 2);
        let route_id = body["data"]["route_id"].as_i64().unwrap();

        let fetched = server
            .get("/api/routes")
            .add_query_param("promoter_id", 1)
            .add_query_param("date", "2024-03-01")
            .await;
        fetched.assert_status_ok();
        let body: Value = fetched.json();
        assert_eq!(body["data"]["id"], route_id);
        assert_eq!(body["data"]["promoter_name"], "Иван Петров");
        assert_eq!(body["data"]["completed_points"], 0);
        let points = body["data"]["points"].as_array().unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0]["point_order"], 1);
        assert_eq!(points[0]["lat"], 54.7104);
        assert_eq!(points[1]["lat"], Value::Null);
        assert_eq!(points[1]["leaflets_distributed"], 0);
    }

    #[tokio::test]
    async fn test_missing_route_is_null_data() {
        let server = test_server();

        let response = server
            .get("/api/routes")
            .add_query_param("date", "1999-12-31")
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let server = test_server();

        server
            .get("/api/routes")
            .add_query_param("date", "not-a-date")
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_complete_points_via_action_and_put() {
        let server = test_server();
        let created: Value = server
            .post("/api/routes")
            .json(&json!({
                "action": "create_route",
                "route_date": "2024-03-02",
                "points": [{"address": "A"}, {"address": "B"}]
            }))
            .await
            .json();
        let route_id = created["data"]["route_id"].as_i64().unwrap();

        let route: Value = server
            .get("/api/routes")
            .add_query_param("date", "2024-03-02")
            .await
            .json();
        let first = route["data"]["points"][0]["id"].as_i64().unwrap();
        let second = route["data"]["points"][1]["id"].as_i64().unwrap();

        let completed: Value = server
            .post("/api/routes")
            .json(&json!({
                "action": "complete_point",
                "point_id": first,
                "leaflets": 20,
                "photo_url": "https://cdn.example/a.jpg"
            }))
            .await
            .json();
        assert_eq!(completed["data"]["status"], "completed");
        assert_eq!(completed["data"]["route_id"], route_id);
        assert_eq!(completed["data"]["completed_points"], 1);
        assert_eq!(completed["data"]["total_leaflets"], 20);

        let response = server
            .put(&format!("/api/routes/points/{}", second))
            .json(&json!({"leaflets": 15}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["point_id"], second);
        assert_eq!(body["data"]["completed_points"], 2);
        assert_eq!(body["data"]["total_leaflets"], 35);

        // Re-completing replaces the leaflet count instead of adding to it
        let body: Value = server
            .put(&format!("/api/routes/points/{}", first))
            .json(&json!({"leaflets": 5}))
            .await
            .json();
        assert_eq!(body["data"]["completed_points"], 2);
        assert_eq!(body["data"]["total_leaflets"], 20);
    }

    #[tokio::test]
    async fn test_oversized_leaflet_count_is_rejected() {
        let server = test_server();
        server
            .post("/api/routes")
            .json(&json!({
                "action": "create_route",
                "route_date": "2024-03-05",
                "points": [{"address": "A"}, {"address": "B"}]
            }))
            .await
            .assert_status_ok();
        let route: Value = server
            .get("/api/routes")
            .add_query_param("date", "2024-03-05")
            .await
            .json();
        let first = route["data"]["points"][0]["id"].as_i64().unwrap();
        let second = route["data"]["points"][1]["id"].as_i64().unwrap();

        server
            .put(&format!("/api/routes/points/{}", first))
            .json(&json!({"leaflets": 2147483647}))
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put(&format!("/api/routes/points/{}", first))
            .json(&json!({"leaflets": 100000}))
            .await
            .assert_status_ok();
        let body: Value = server
            .put(&format!("/api/routes/points/{}", second))
            .json(&json!({"leaflets": 5}))
            .await
            .json();
        assert_eq!(body["data"]["total_leaflets"], 100005);
    }

    #[tokio::test]
    async fn test_unknown_action_is_bad_request() {
        let server = test_server();

        let response = server
            .post("/api/routes")
            .json(&json!({"action": "delete_route", "route_id": 1}))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_negative_leaflets_are_rejected() {
        let server = test_server();

        let response = server
            .post("/api/routes")
            .json(&json!({"action": "complete_point", "point_id": 1, "leaflets": -1}))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn test_completing_missing_point_is_not_found() {
        let server = test_server();

        server
            .put("/api/routes/points/4242")
            .json(&json!({"leaflets": 3}))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_route_conflicts_when_unique_per_day() {
        let (server, _) = test_server_with(RouteConfig {
            unique_per_day: true,
        });
        let create = json!({
            "action": "create_route",
            "route_date": "2024-03-03",
            "points": [{"address": "A"}]
        });

        server.post("/api/routes").json(&create).await.assert_status_ok();
        server
            .post("/api/routes")
            .json(&create)
            .expect_failure()
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_report_json_and_csv() {
        let server = test_server();
        let created: Value = server
            .post("/api/routes")
            .json(&json!({
                "action": "create_route",
                "route_date": "2024-03-04",
                "points": [{"address": "пр. Мира, д. 45, Калининград"}]
            }))
            .await
            .json();
        let route_id = created["data"]["route_id"].as_i64().unwrap();

        let json_report = server
            .get("/api/reports")
            .add_query_param("route_id", route_id)
            .await;
        json_report.assert_status_ok();
        let body: Value = json_report.json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["address"], "пр. Мира, д. 45, Калининград");
        assert_eq!(body["data"][0]["completed"], false);

        let csv = server
            .get("/api/reports")
            .add_query_param("route_id", route_id)
            .add_query_param("format", "csv")
            .await;
        csv.assert_status_ok();
        assert_eq!(
            csv.header(header::CONTENT_TYPE),
            HeaderValue::from_static("text/csv; charset=utf-8")
        );
        assert_eq!(
            csv.header(header::CONTENT_DISPOSITION),
            HeaderValue::from_str(&format!("attachment; filename=\"report_{}.csv\"", route_id))
                .unwrap()
        );
        let text = csv.text();
        assert!(text.starts_with("Дата,Промоутер"));
        assert!(text.contains("\"пр. Мира, д. 45, Калининград\",Нет,0"));
    }

    #[tokio::test]
    async fn test_csv_for_unknown_route_is_placeholder() {
        let server = test_server();

        let response = server
            .get("/api/reports")
            .add_query_param("route_id", 777)
            .add_query_param("format", "csv")
            .await;
        response.assert_status_ok();
        response.assert_text("Нет данных");
    }

    #[tokio::test]
    async fn test_send_report() {
        let (server, store) = test_server_with(RouteConfig::default());
        let seeded: Value = server.post("/api/init-data").await.json();
        let route_id = seeded["data"]["route_id"].as_i64().unwrap();

        let response = server
            .post("/api/reports")
            .json(&json!({"route_id": route_id}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["message"], "Report sent");
        assert_eq!(body["data"]["status"], "sent");
        assert_eq!(body["data"]["summary"]["completed"], 2);
        assert_eq!(body["data"]["summary"]["total"], 6);
        assert_eq!(body["data"]["summary"]["leaflets"], 55);
        assert_eq!(store.daily_report_count(route_id).await, 1);

        let missing = server
            .post("/api/reports")
            .json(&json!({"route_id": route_id + 100}))
            .expect_failure()
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: Value = missing.json();
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_seed_is_post_only() {
        let server = test_server();

        let response = server.post("/api/init-data").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "success");
        assert_eq!(body["data"]["points_created"], 6);

        server
            .get("/api/init-data")
            .expect_failure()
            .await
            .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_preflight_lists_endpoint_methods() {
        let server = test_server();
        let (origin_name, origin_value) = origin();

        let response = server
            .method(Method::OPTIONS, "/api/routes")
            .add_header(origin_name, origin_value)
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;
        response.assert_status_ok();
        let methods = response.header(header::ACCESS_CONTROL_ALLOW_METHODS);
        let methods = methods.to_str().unwrap();
        assert!(methods.contains("GET"));
        assert!(methods.contains("POST"));
        assert!(methods.contains("PUT"));

        let (origin_name, origin_value) = origin();
        let seed = server
            .method(Method::OPTIONS, "/api/init-data")
            .add_header(origin_name, origin_value)
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;
        seed.assert_status_ok();
        let methods = seed.header(header::ACCESS_CONTROL_ALLOW_METHODS);
        assert!(!methods.to_str().unwrap().contains("GET"));
    }

    #[tokio::test]
    async fn test_plain_options_is_answered_by_cors_layer() {
        let server = test_server();

        for path in ["/api/routes", "/api/reports", "/api/init-data"] {
            server
                .method(Method::OPTIONS, path)
                .await
                .assert_status_ok();
        }
    }

    #[tokio::test]
    async fn test_responses_allow_any_origin() {
        let server = test_server();
        let (origin_name, origin_value) = origin();

        let response = server
            .get("/api/reports")
            .add_query_param("route_id", 1)
            .add_header(origin_name, origin_value)
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            HeaderValue::from_static("*")
        );
    }
}
