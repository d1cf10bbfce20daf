//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and external services.

mod review_service;

pub use review_service::{ReviewService, INVALID_ID};
