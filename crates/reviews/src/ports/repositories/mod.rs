//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod review_repository;

pub use review_repository::*;
