//! Route reports: JSON/CSV exports and sent-report snapshots.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/reports?route_id=&format=` | Route report as JSON or CSV |
//! | POST | `/api/reports` | Send report (stores a daily snapshot) |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
