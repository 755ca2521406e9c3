//! Demo data seeding. Not part of the production data path.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/init-data` | Create today's demo route |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::SeedService;
