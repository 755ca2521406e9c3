mod seed_handler;

pub use seed_handler::*;
