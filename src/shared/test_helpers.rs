#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum_test::TestServer;

#[cfg(test)]
use crate::app::{build_router, AppServices};
#[cfg(test)]
use crate::core::config::RouteConfig;
#[cfg(test)]
use crate::modules::storage::MemoryRouteStore;

/// HTTP test server over a fresh in-memory store, allowing any origin
#[cfg(test)]
#[allow(dead_code)]
pub fn test_server() -> TestServer {
    test_server_with(RouteConfig::default()).0
}

/// Like [`test_server`], also returning the store for direct assertions
#[cfg(test)]
#[allow(dead_code)]
pub fn test_server_with(route_config: RouteConfig) -> (TestServer, Arc<MemoryRouteStore>) {
    let store = Arc::new(MemoryRouteStore::new());
    let services = AppServices::new(store.clone(), route_config);
    let router = build_router(services, &["*".to_string()]);
    let server = TestServer::new(router).expect("test server should start");
    (server, store)
}
