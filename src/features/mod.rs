pub mod promoter_routes;
pub mod reports;
pub mod seed;
