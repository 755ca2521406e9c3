//! Modules layer - Persistence backends shared by the features
//!
//! Contains the route store contract and its PostgreSQL and in-memory adapters.

pub mod storage;
