//! Promoter routes: daily point lists and point completion.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/routes` | Route of a promoter for a date, with points |
//! | POST | `/api/routes` | `create_route` / `complete_point` actions |
//! | PUT | `/api/routes/points/{id}` | Complete a point |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::RouteService;
