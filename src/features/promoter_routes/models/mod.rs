mod promoter;
mod route;
mod route_point;

pub use promoter::Promoter;
pub use route::{NewRoute, NewRoutePoint, Route, RouteWithPromoter};
pub use route_point::{PointCompletion, PointProgress, RoutePoint};
