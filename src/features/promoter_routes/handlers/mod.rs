mod route_handler;

pub use route_handler::*;
