pub mod aggregation;
mod route_service;

pub use route_service::RouteService;
pub(crate) use route_service::today;
